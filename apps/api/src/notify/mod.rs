// Alert notification: evaluates save/publish events against instant alerts
// and hands every hit to the configured dispatcher.

pub mod dispatcher;
pub mod events;
pub mod handlers;
