// Resume analysis: the four actions, their fixed prompts, request assembly,
// and the single dispatch path that calls the text generator.
// All generation goes through llm_client::TextGenerator; no direct HTTP calls here.

pub mod action;
pub mod dispatch;
pub mod handlers;
pub mod prompts;
pub mod request;
