// Typed endpoint wrappers, one file per domain.
//
// Each method builds the flat form payload, submits it through the
// authenticated client, and unwraps the relevant response field(s).

mod config;
mod logs;
mod modules;
mod neighbors;
mod system;
