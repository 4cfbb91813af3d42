#[path = "helpers/mod.rs"]
mod helpers;

#[path = "completion/mod.rs"]
mod completion;

#[path = "scan/mod.rs"]
mod scan;
