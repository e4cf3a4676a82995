pub use crate::{ext::ExtendVector3, pretty::PrettyPrint};
