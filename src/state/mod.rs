pub mod camera;
pub mod flight;
pub mod pointer;

pub use camera::{Camera, Region, ScreenPoint, ViewSize, WorldPoint, ZoomAnchor};
pub use flight::{FlyOptions, FlyTarget, Flight};
pub use pointer::{PointerState, Release};
