use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::{
    Adapter, CompositeAlphaMode, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface,
    TextureFormat,
};

/// Sample count used when multisampling is requested and supported
pub const MSAA_SAMPLES: u32 = 4;

/// Adapter, device and queue for one window surface
#[derive(Clone)]
pub struct GpuContext {
    adapter: Arc<Adapter>,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a GPU context compatible with the provided surface.
    ///
    /// The surface must come from the same `instance`.
    pub async fn for_surface(instance: &Instance, surface: &Surface<'_>) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        let (device, queue) = Self::request_device(&adapter).await?;

        Ok(Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Human-readable adapter name and backend, for the startup log
    pub fn adapter_summary(&self) -> String {
        let info = self.adapter.get_info();
        format!("{} ({:?})", info.name, info.backend)
    }

    /// Sample count for color/depth targets of `format`
    pub fn sample_count(&self, format: TextureFormat, antialias: bool) -> u32 {
        let flags = self.adapter.get_texture_format_features(format).flags;
        select_sample_count(antialias, flags.sample_count_supported(MSAA_SAMPLES))
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        let mut requested_features = Features::empty();

        // Needed for multisampling formats beyond the WebGPU baseline
        if adapter
            .features()
            .contains(Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES)
        {
            requested_features |= Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
        }

        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Hero Scene Device"),
                required_features: requested_features,
                required_limits: Limits::default().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to create GPU device")
    }
}

pub fn select_sample_count(antialias: bool, msaa_supported: bool) -> u32 {
    if antialias && msaa_supported {
        MSAA_SAMPLES
    } else {
        1
    }
}

/// Prefer an sRGB format so lighting stays in linear space until presentation
pub fn select_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Transparent canvases need a compositor mode that honours alpha.
/// Output is premultiplied, so that mode wins when offered.
pub fn select_alpha_mode(modes: &[CompositeAlphaMode], transparent: bool) -> CompositeAlphaMode {
    let fallback = modes.first().copied().unwrap_or(CompositeAlphaMode::Auto);
    if !transparent {
        return if modes.contains(&CompositeAlphaMode::Opaque) {
            CompositeAlphaMode::Opaque
        } else {
            fallback
        };
    }

    [CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::PostMultiplied]
        .into_iter()
        .find(|mode| modes.contains(mode))
        .unwrap_or(fallback)
}
