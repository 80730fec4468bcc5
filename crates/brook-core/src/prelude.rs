pub use crate::derived::derived;
pub use crate::effects::{Dispose, effect};
pub use crate::error::LoadError;
pub use crate::reactive::{ObserverKey, SourceId};
pub use crate::resource::{Resource, ResourceState, Status, resource, resource_with_initial};
pub use crate::scope::{Scope, current_scope, on_scope_dispose};
pub use crate::signal::{Signal, signal};
pub use crate::task;
