//! Satisfaction prediction: artifact loading and the encode → infer →
//! decode pipeline.
//!
//! ```text
//!  satisfied_model.json  *_encoder.json
//!          │                  │
//!          ▼                  ▼
//!   ┌─────────────────────────────┐
//!   │ artifacts  → ArtifactState  │  Loaded(bundle) | Unavailable(reason)
//!   └─────────────────────────────┘
//!          │
//!          ▼
//!   ┌──────────┐
//!   │ pipeline  │  membership → code, features, model, code → label
//!   └──────────┘
//! ```

pub mod artifacts;
pub mod classifier;
pub mod encoder;
pub mod features;
pub mod pipeline;
