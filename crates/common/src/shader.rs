use std::sync::Arc;

use crate::uniform::Uniforms;
use crate::vertex::{InFragment, InVertex, OutFragment, OutVertex};

/// Programmable vertex stage: fill in the clip-space position and the
/// attributes the program forwards.
pub type VertexShader = Arc<dyn Fn(&mut OutVertex, &InVertex, &Uniforms) + Send + Sync>;

/// Programmable fragment stage: fill in the output colour.
pub type FragmentShader = Arc<dyn Fn(&mut OutFragment, &InFragment, &Uniforms) + Send + Sync>;
