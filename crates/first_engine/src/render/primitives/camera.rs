//! # 3D Camera System
//!
//! Viewer position, orientation basis and projection parameters, producing the
//! view and projection matrices consumed by every draw call.
//!
//! ## Update strategies
//! A camera rebuilds its view matrix in one of two ways, chosen once when the
//! camera is created (see [`ViewUpdate`]):
//! - **Basis**: movement and rotation calls edit `right`/`up`/`look` in place,
//!   then [`Camera::update_view_matrix`] re-orthonormalizes the basis and
//!   builds the view from it.
//! - **Euler**: [`Camera::render`] rotates the initial look/up directions by
//!   the stored pitch/yaw/roll (degrees) and builds a look-at view.
//!
//! Neither path runs automatically. Mutators only edit state; the owning scene
//! calls [`Camera::refresh`] (or the matching path directly) once per frame
//! before reading [`Camera::view_matrix`].
//!
//! ## Conventions
//! Left-handed, Y-up, +Z forward. Matrices are applied to column vectors, so
//! the combined transform is `projection * view`.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Point3, Vec3};

const INITIAL_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const INITIAL_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const INITIAL_LOOK: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// How a camera rebuilds its view matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewUpdate {
    /// Incremental basis edits followed by [`Camera::update_view_matrix`]
    #[default]
    Basis,
    /// Pitch/yaw/roll re-applied to the initial basis by [`Camera::render`]
    Euler,
}

/// Perspective camera with an explicit right/up/look basis
///
/// The basis is orthonormal right after [`Camera::update_view_matrix`] or
/// [`Camera::look_at`]; between mutations it may drift and is only corrected by
/// the next view update.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    /// Pitch/yaw/roll in degrees, read by the Euler path only
    rotation: Vec3,

    right: Vec3,
    up: Vec3,
    look: Vec3,

    view: Mat4,
    projection: Mat4,

    near_z: f32,
    far_z: f32,
    aspect: f32,
    fov_y: f32,
    near_window_height: f32,
    far_window_height: f32,

    view_update: ViewUpdate,
    mixed_update_warned: bool,
}

impl Camera {
    /// Create a basis-driven camera at the origin looking down +Z
    ///
    /// Lens defaults to a 45 degree vertical field of view, square aspect and a
    /// `[1, 1000]` depth range. The view matrix starts as identity.
    pub fn new() -> Self {
        Self::with_view_update(ViewUpdate::Basis)
    }

    /// Create a camera that rebuilds its view with the given strategy
    pub fn with_view_update(view_update: ViewUpdate) -> Self {
        let mut camera = Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            right: INITIAL_RIGHT,
            up: INITIAL_UP,
            look: INITIAL_LOOK,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            near_z: 0.0,
            far_z: 0.0,
            aspect: 0.0,
            fov_y: 0.0,
            near_window_height: 0.0,
            far_window_height: 0.0,
            view_update,
            mixed_update_warned: false,
        };
        camera.set_lens(constants::QUARTER_PI, 1.0, 1.0, 1000.0);
        camera
    }

    /// Build a camera from a configuration and refresh its view once
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::with_view_update(config.view_update);
        let [px, py, pz] = config.position;
        let [rx, ry, rz] = config.rotation;
        camera.set_position(px, py, pz);
        camera.set_rotation(rx, ry, rz);
        camera.set_lens(config.fov_y, config.aspect, config.near_z, config.far_z);
        camera.refresh();
        camera
    }

    /// Strategy this camera was created with
    pub fn view_update(&self) -> ViewUpdate {
        self.view_update
    }

    /// Overwrite the world-space position
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
        log::trace!("Camera position set to: {:?}", self.position);
    }

    /// Overwrite the pitch/yaw/roll angles, in degrees
    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vec3::new(x, y, z);
        log::trace!("Camera rotation set to: {:?}", self.rotation);
    }

    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Pitch/yaw/roll as stored, nominally degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Camera right axis in world space
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Camera up axis in world space
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Camera look axis in world space
    pub fn look(&self) -> Vec3 {
        self.look
    }

    /// Near plane distance
    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    /// Far plane distance
    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    /// Aspect ratio (width / height)
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Vertical field of view in radians
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians, derived from the near window
    pub fn fov_x(&self) -> f32 {
        let half_width = 0.5 * self.near_window_width();
        2.0 * (half_width / self.near_z).atan()
    }

    /// Width of the frustum cross-section at the near plane
    pub fn near_window_width(&self) -> f32 {
        self.aspect * self.near_window_height
    }

    /// Height of the frustum cross-section at the near plane
    pub fn near_window_height(&self) -> f32 {
        self.near_window_height
    }

    /// Width of the frustum cross-section at the far plane
    pub fn far_window_width(&self) -> f32 {
        self.aspect * self.far_window_height
    }

    /// Height of the frustum cross-section at the far plane
    pub fn far_window_height(&self) -> f32 {
        self.far_window_height
    }

    /// View matrix as of the last view update
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix as of the last [`Camera::set_lens`]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Combined `projection * view` transform
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }

    /// View matrix in column-major array form for buffer uploads
    pub fn view_matrix_cols(&self) -> [[f32; 4]; 4] {
        self.view.into()
    }

    /// Projection matrix in column-major array form for buffer uploads
    pub fn projection_matrix_cols(&self) -> [[f32; 4]; 4] {
        self.projection.into()
    }

    /// Set the frustum and rebuild the projection matrix
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians, within `(0, π)`
    /// * `aspect` - Width / height, positive
    /// * `z_near` - Near plane distance, positive
    /// * `z_far` - Far plane distance, greater than `z_near`
    ///
    /// Parameters outside these ranges are the caller's responsibility. They are
    /// asserted in debug builds only; release builds produce a degenerate
    /// projection without reporting anything.
    pub fn set_lens(&mut self, fov_y: f32, aspect: f32, z_near: f32, z_far: f32) {
        debug_assert!(
            fov_y > 0.0 && fov_y < constants::PI,
            "fov_y must lie in (0, π), got {fov_y}"
        );
        debug_assert!(aspect > 0.0, "aspect must be positive, got {aspect}");
        debug_assert!(
            z_near > 0.0 && z_near < z_far,
            "expected 0 < z_near < z_far, got {z_near} and {z_far}"
        );

        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near_z = z_near;
        self.far_z = z_far;

        self.near_window_height = 2.0 * self.near_z * (0.5 * self.fov_y).tan();
        self.far_window_height = 2.0 * self.far_z * (0.5 * self.fov_y).tan();

        self.projection = Mat4::perspective_lh(self.fov_y, self.aspect, self.near_z, self.far_z);
        log::debug!(
            "Camera lens set: fov_y={:.3} aspect={:.3} near={} far={}",
            fov_y,
            aspect,
            z_near,
            z_far
        );
    }

    /// Place the camera at `pos` facing `target`
    ///
    /// Rebuilds the basis from `world_up` and overwrites the position. The view
    /// matrix is left untouched until the next view update.
    pub fn look_at(&mut self, pos: Vec3, target: Vec3, world_up: Vec3) {
        let look = (target - pos).normalize();
        let right = world_up.cross(&look).normalize();
        let up = look.cross(&right);

        self.position = pos;
        self.look = look;
        self.right = right;
        self.up = up;
        log::trace!("Camera look_at - position: {:?}, look: {:?}", pos, look);
    }

    /// Point-based form of [`Camera::look_at`]
    pub fn look_at_points(&mut self, pos: &Point3, target: &Point3, up: &Vec3) {
        self.look_at(pos.coords, target.coords, *up);
    }

    /// Move along the right axis by a signed distance
    pub fn strafe(&mut self, d: f32) {
        self.position += self.right * d;
    }

    /// Move along the look axis by a signed distance
    pub fn walk(&mut self, d: f32) {
        self.position += self.look * d;
    }

    /// Rotate up and look about the current right axis by `angle` radians
    ///
    /// Also records `angle` as the stored pitch, replacing the previous value
    /// rather than adding to it. Both effects always happen together.
    pub fn pitch(&mut self, angle: f32) {
        self.rotation.x = angle;

        let r = Mat4::rotation_axis(self.right, angle);
        self.up = r.transform_vector(&self.up);
        self.look = r.transform_vector(&self.look);
    }

    /// Rotate the whole basis about the world Y axis by `angle` radians
    pub fn rotate_y(&mut self, angle: f32) {
        let r = Mat4::rotation_y(angle);
        self.right = r.transform_vector(&self.right);
        self.up = r.transform_vector(&self.up);
        self.look = r.transform_vector(&self.look);
    }

    /// Rebuild the view matrix with this camera's [`ViewUpdate`] strategy
    pub fn refresh(&mut self) {
        match self.view_update {
            ViewUpdate::Basis => self.update_view_matrix(),
            ViewUpdate::Euler => self.render(),
        }
    }

    /// Re-orthonormalize the basis and rebuild the view matrix from it
    ///
    /// Must run after any sequence of strafe/walk/pitch/rotate/look-at calls
    /// before the view matrix is read.
    pub fn update_view_matrix(&mut self) {
        self.note_update_path(ViewUpdate::Basis);

        self.look = self.look.normalize();
        self.up = self.look.cross(&self.right).normalize();
        // up and look are orthonormal already
        self.right = self.up.cross(&self.look);

        self.view = Mat4::view_from_basis(self.position, self.right, self.up, self.look);
    }

    /// Rebuild the view matrix from the stored pitch/yaw/roll
    ///
    /// The angles rotate the initial +Z look and +Y up directions; the
    /// incrementally edited basis is neither read nor written.
    pub fn render(&mut self) {
        self.note_update_path(ViewUpdate::Euler);

        let pitch = utils::deg_to_rad(self.rotation.x);
        let yaw = utils::deg_to_rad(self.rotation.y);
        let roll = utils::deg_to_rad(self.rotation.z);
        let rotation = Mat4::rotation_roll_pitch_yaw(pitch, yaw, roll);

        let look = rotation.transform_vector(&INITIAL_LOOK);
        let up = rotation.transform_vector(&INITIAL_UP);

        self.view = Mat4::look_at(self.position, self.position + look, up);
    }

    fn note_update_path(&mut self, path: ViewUpdate) {
        if path != self.view_update && !self.mixed_update_warned {
            log::warn!(
                "Camera created for {:?} view updates is being rebuilt through the {:?} path",
                self.view_update,
                path
            );
            self.mixed_update_warned = true;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable starting state for a [`Camera`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space position
    pub position: [f32; 3],
    /// Pitch/yaw/roll in degrees
    pub rotation: [f32; 3],
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width / height
    pub aspect: f32,
    /// Near plane distance
    pub near_z: f32,
    /// Far plane distance
    pub far_z: f32,
    /// View rebuild strategy
    pub view_update: ViewUpdate,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            fov_y: constants::QUARTER_PI,
            aspect: 1.0,
            near_z: 1.0,
            far_z: 1000.0,
            view_update: ViewUpdate::Basis,
        }
    }
}

impl Config for CameraConfig {}
