pub mod animation;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod layout;
pub mod marker;
pub mod sample;
pub mod selection;
pub mod testing;

pub use animation::{
    build_animation_plan, AnimationConfig, AnimationPlan, AnimationStep, TimingCurve,
};
pub use engine::{Layout, PointCloudLayoutEngine};
pub use error::LayoutError;
pub use layout::{
    compute_centroid, normalize, BoundingBox, CenteringPolicy, LayoutConfig, LayoutTransform,
};
pub use marker::{ColorToken, NormalizedMarker};
pub use sample::{RawSample, SampleSet};
pub use selection::{OrbitalKind, RequestSequencer, RequestToken, Selection};
