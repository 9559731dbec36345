// Shared simulation/visual tuning constants used by both web and native frontends.

// Session
pub const PARTICLE_COUNT: usize = 4000; // default N, fixed for the lifetime of a session
pub const SEED_PHASE_SPREAD: f32 = 10.0; // per-particle seed -> noise phase offset (radians)

// Sphere
pub const SPHERE_RADIUS: f32 = 2.5;

// Cube
pub const CUBE_HALF_EXTENT: f32 = 2.0;

// Torus ("Vortex")
pub const TORUS_MAJOR_RADIUS: f32 = 3.0;
pub const TORUS_MINOR_RADIUS: f32 = 1.0;

// Double helix
pub const HELIX_HALF_HEIGHT: f32 = 10.0; // t spans [-10, 10]
pub const HELIX_RADIUS: f32 = 1.5;
pub const HELIX_FREQUENCY: f32 = 1.0;
pub const HELIX_JITTER: f32 = 0.25; // +/- per axis on x and z

// Trefoil knot
pub const TREFOIL_SCALE: f32 = 0.8;
pub const TREFOIL_JITTER: f32 = 0.25; // +/- per axis

// Spiral galaxy
pub const GALAXY_ARMS: usize = 3;
pub const GALAXY_RADIUS: f32 = 6.0;
pub const GALAXY_SPIN: f32 = 1.0; // radians of twist per unit radius
pub const GALAXY_THICKNESS: f32 = 0.6; // disk height numerator, divided by (r + eps)
pub const GALAXY_THICKNESS_EPS: f32 = 0.5;
pub const GALAXY_STAR_DUST: f32 = 0.075; // +/- per axis

// Gesture scale targets
pub const SCALE_IDLE: f32 = 1.0;
pub const SCALE_OPEN: f32 = 2.5; // explode
pub const SCALE_COMPRESSED: f32 = 0.1; // implode / aggregate

// Color
pub const DEFAULT_COLOR_HEX: &str = "#00ffff";
pub const HUE_CYCLE_RATE: f32 = 0.2; // hue turns per second in auto-cycle mode
pub const AUTO_SATURATION: f32 = 1.0;
pub const AUTO_LIGHTNESS: f32 = 0.6;
pub const PALETTE: [[f32; 3]; 6] = [
    [0.0, 1.0, 1.0],   // cyan
    [1.0, 0.0, 1.0],   // magenta
    [1.0, 0.84, 0.0],  // gold
    [0.2, 1.0, 0.4],   // green
    [1.0, 0.3, 0.2],   // ember
    [0.55, 0.4, 1.0],  // violet
];

// Rendering
pub const POINT_SIZE_PX: f32 = 3.0;
pub const POINT_OPACITY: f32 = 0.8;
pub const CLEAR_COLOR: [f64; 3] = [0.0196, 0.0196, 0.0196]; // #050505

// Camera
pub const CAMERA_DISTANCE: f32 = 8.0;
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_MIN_DISTANCE: f32 = 2.0;
pub const CAMERA_MAX_DISTANCE: f32 = 20.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_AUTO_ROTATE_SPEED: f32 = 0.5; // orbit-controls units: one turn per 120 s
pub const CAMERA_ORBIT_SENSITIVITY: f32 = 0.005; // radians per pixel dragged
pub const CAMERA_ZOOM_STEP: f32 = 0.95; // distance multiplier per scroll notch
pub const CAMERA_MAX_PITCH: f32 = 1.5;

// Frame-rate independent lerp reference
pub const REFERENCE_FPS: f32 = 60.0;
