//! Scene composition: the immutable topology of a hero background plus the
//! time-varying pose of every object, and the per-frame snapshot handed to
//! the renderer.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::camera::CameraConfig;
use crate::core::animator::base_rotation;
use crate::core::float::{float_offset, FloatOffset, FloatParams};
use crate::core::particles::ParticleField;
use crate::lights::{AmbientLight, DirectionalLight, LightRig, PointLight};
use crate::material::{Material, PointsMaterial};
use crate::math::rotation_xyz;
use crate::primitive::PrimitiveKind;

/// Float phases are drawn from `[0, FLOAT_PHASE_RANGE)` seconds
pub const FLOAT_PHASE_RANGE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectId(pub usize);

/// Time-derived state of an object, rewritten every frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub rotation: Vec3,
    pub float: FloatOffset,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    kind: PrimitiveKind,
    position: Vec3,
    color: u32,
    speed: f32,
    material: Material,
    float: FloatParams,
    float_phase: f32,
    pose: Pose,
}

impl SceneObject {
    pub fn new(id: ObjectId, kind: PrimitiveKind, position: Vec3, color: u32, speed: f32, float_phase: f32) -> Self {
        let profile = kind.profile();
        Self {
            id,
            kind,
            position,
            color,
            speed,
            material: profile.material(color),
            float: profile.float,
            float_phase,
            pose: Pose::default(),
        }
    }

    /// Overwrite the pose from the clock reading; no state carries between calls
    pub fn animate(&mut self, elapsed: f32) {
        self.pose = Pose {
            rotation: base_rotation(self.kind, elapsed, self.speed),
            float: float_offset(&self.float, elapsed, self.float_phase),
        };
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn float_params(&self) -> FloatParams {
        self.float
    }

    pub fn float_phase(&self) -> f32 {
        self.float_phase
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Base rotation angles (radians, XYZ order)
    pub fn rotation(&self) -> Vec3 {
        self.pose.rotation
    }

    /// Float group around the mesh: `T(lift) * R(float) * T(position) * R(base)`
    pub fn model_matrix(&self) -> Mat4 {
        let float = Mat4::from_translation(Vec3::new(0.0, self.pose.float.lift, 0.0))
            * rotation_xyz(self.pose.float.rotation);
        let mesh = Mat4::from_translation(self.position) * rotation_xyz(self.pose.rotation);
        float * mesh
    }
}

/// One mesh to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInstance {
    pub id: ObjectId,
    pub kind: PrimitiveKind,
    pub model: Mat4,
    pub material: Material,
}

#[derive(Debug, Clone, Copy)]
pub struct ParticleInstance<'a> {
    pub positions: &'a [f32],
    pub model: Mat4,
    pub material: PointsMaterial,
}

/// Read-only snapshot of a scene for one frame
#[derive(Debug, Clone)]
pub struct FrameGraph<'a> {
    pub camera: &'a CameraConfig,
    pub lights: &'a LightRig,
    pub meshes: Vec<MeshInstance>,
    pub particles: Option<ParticleInstance<'a>>,
    pub elapsed: f32,
    pub transparent: bool,
}

#[derive(Debug, Clone)]
pub struct Scene {
    camera: CameraConfig,
    lights: LightRig,
    objects: Vec<SceneObject>,
    particles: Option<ParticleField>,
    transparent: bool,
    elapsed: f32,
}

impl Scene {
    /// Advance every time-dependent value to `elapsed` seconds.
    /// Absolute: calling with an earlier time rewinds the pose.
    pub fn update(&mut self, elapsed: f32) {
        for object in &mut self.objects {
            object.animate(elapsed);
        }
        if let Some(particles) = &mut self.particles {
            particles.update(elapsed);
        }
        self.elapsed = elapsed;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn objects_of(&self, kind: PrimitiveKind) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn frame_graph(&self) -> FrameGraph<'_> {
        FrameGraph {
            camera: &self.camera,
            lights: &self.lights,
            meshes: self
                .objects
                .iter()
                .map(|object| MeshInstance {
                    id: object.id,
                    kind: object.kind,
                    model: object.model_matrix(),
                    material: object.material,
                })
                .collect(),
            particles: self.particles.as_ref().map(|field| ParticleInstance {
                positions: field.positions(),
                model: field.model_matrix(),
                material: *field.material(),
            }),
            elapsed: self.elapsed,
            transparent: self.transparent,
        }
    }

    /// Static topology in a serializable form
    pub fn describe(&self) -> SceneDescription {
        SceneDescription {
            camera: CameraDescription {
                position: self.camera.position.to_array(),
                fov_degrees: self.camera.fov_degrees,
                near: self.camera.near,
                far: self.camera.far,
            },
            ambient_intensity: self.lights.ambient.intensity,
            directional_lights: self
                .lights
                .directional
                .iter()
                .map(|l| LightDescription::new(l.position, l.color, l.intensity))
                .collect(),
            point_lights: self
                .lights
                .points
                .iter()
                .map(|l| LightDescription::new(l.position, l.color, l.intensity))
                .collect(),
            objects: self
                .objects
                .iter()
                .map(|o| ObjectDescription {
                    id: o.id,
                    kind: o.kind,
                    position: o.position.to_array(),
                    color: format!("#{:06x}", o.color),
                    speed: o.speed,
                    roughness: o.material.roughness,
                    metalness: o.material.metalness,
                    emissive_intensity: o.material.emissive_intensity,
                    distort: o.material.distort_amount(),
                })
                .collect(),
            particle_count: self.particles.as_ref().map_or(0, ParticleField::count),
            transparent: self.transparent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    pub ambient_intensity: f32,
    pub directional_lights: Vec<LightDescription>,
    pub point_lights: Vec<LightDescription>,
    pub objects: Vec<ObjectDescription>,
    pub particle_count: usize,
    pub transparent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraDescription {
    pub position: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LightDescription {
    pub position: [f32; 3],
    pub color: String,
    pub intensity: f32,
}

impl LightDescription {
    fn new(position: Vec3, color: u32, intensity: f32) -> Self {
        Self {
            position: position.to_array(),
            color: format!("#{:06x}", color),
            intensity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectDescription {
    pub id: ObjectId,
    pub kind: PrimitiveKind,
    pub position: [f32; 3],
    pub color: String,
    pub speed: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive_intensity: f32,
    pub distort: f32,
}

/// Builder for scenes with a fluent API
///
/// ```
/// use glam::Vec3;
/// use hero_scene::scene::SceneBuilder;
///
/// let scene = SceneBuilder::seeded(7)
///     .add_torus(Vec3::new(-2.0, -2.0, -3.0), 0x00d4ff)
///     .with_ambient(0.3)
///     .with_particles(50)
///     .build();
/// assert_eq!(scene.objects().len(), 1);
/// ```
pub struct SceneBuilder {
    rng: StdRng,
    camera: CameraConfig,
    lights: LightRig,
    objects: Vec<SceneObject>,
    particles: Option<(usize, PointsMaterial)>,
    transparent: bool,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    /// Builder with an entropy-seeded RNG: phases and particles differ per run
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible builder
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            camera: CameraConfig::default(),
            lights: LightRig::default(),
            objects: Vec::new(),
            particles: None,
            transparent: true,
        }
    }

    /// Adds a primitive; the float phase is drawn here, once
    pub fn add(mut self, kind: PrimitiveKind, position: Vec3, color: u32, speed: f32) -> Self {
        let id = ObjectId(self.objects.len());
        let phase = self.rng.gen_range(0.0..FLOAT_PHASE_RANGE);
        self.objects
            .push(SceneObject::new(id, kind, position, color, speed, phase));
        self
    }

    pub fn add_distorted_icosahedron(self, position: Vec3, color: u32, speed: f32) -> Self {
        self.add(PrimitiveKind::IcosahedronDistort, position, color, speed)
    }

    pub fn add_torus(self, position: Vec3, color: u32) -> Self {
        self.add(PrimitiveKind::Torus, position, color, 1.0)
    }

    pub fn add_box(self, position: Vec3, color: u32) -> Self {
        self.add(PrimitiveKind::Box, position, color, 1.0)
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// White ambient light, replacing any previous one
    pub fn with_ambient(mut self, intensity: f32) -> Self {
        self.lights.ambient = AmbientLight {
            color: 0xffffff,
            intensity,
        };
        self
    }

    pub fn add_directional(mut self, position: Vec3, color: u32, intensity: f32) -> Self {
        self.lights.directional.push(DirectionalLight {
            position,
            color,
            intensity,
        });
        self
    }

    pub fn add_point_light(mut self, position: Vec3, color: u32, intensity: f32) -> Self {
        self.lights.points.push(PointLight {
            position,
            color,
            intensity,
        });
        self
    }

    pub fn with_particles(self, count: usize) -> Self {
        self.with_particle_material(count, PointsMaterial::default())
    }

    pub fn with_particle_material(mut self, count: usize, material: PointsMaterial) -> Self {
        self.particles = Some((count, material));
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn build(mut self) -> Scene {
        let particles = self
            .particles
            .map(|(count, material)| ParticleField::generate(count, &mut self.rng).with_material(material));

        let mut scene = Scene {
            camera: self.camera,
            lights: self.lights,
            objects: self.objects,
            particles,
            transparent: self.transparent,
            elapsed: 0.0,
        };
        scene.update(0.0);

        log::debug!(
            "scene composed: {} objects, {} particles, {} directional + {} point lights",
            scene.objects.len(),
            scene.particles.as_ref().map_or(0, ParticleField::count),
            scene.lights.directional.len(),
            scene.lights.points.len(),
        );
        scene
    }
}
