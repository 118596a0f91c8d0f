/// Index of an animation frame, counted from `0`.
///
/// The camera yaw is a linear function of this value, so it also acts as
/// the animation clock.
pub type FrameIndex = u32;
