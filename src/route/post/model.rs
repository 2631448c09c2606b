use serde::Deserialize;

pub use crate::model::PostContent;

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
	/// Set after a submission was rejected because its title is already taken.
	#[serde(default)]
	pub exists: bool,
}
