//! Normalized user profile handed to the verification callback.

// crates.io
use serde::Serializer;
// self
use crate::{_prelude::*, auth::ProviderId, provider::FieldMapping};

/// Provider profile payload with the provider identity stamped on and a canonical
/// identifier derived from configuration.
///
/// The canonical `id` is absent (never an empty string) when neither a literal `id` field
/// nor the mapped field carries a non-null value. Whether an absent identifier is fatal
/// is the verification callback's decision, not the relay's.
#[derive(Clone, Debug)]
pub struct UserProfile {
	provider: ProviderId,
	id: Option<String>,
	claims: JsonMap<String, Value>,
}
impl UserProfile {
	/// Stamps the provider identity onto raw claims and derives the canonical identifier.
	pub fn normalize(
		provider: ProviderId,
		mapping: &FieldMapping,
		claims: JsonMap<String, Value>,
	) -> Self {
		let id = derive_id(&claims, mapping);

		Self { provider, id, claims }
	}

	/// Provider the profile was fetched from.
	pub fn provider(&self) -> &ProviderId {
		&self.provider
	}

	/// Canonical user identifier, when derivable.
	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Raw provider claims, exactly as fetched.
	pub fn claims(&self) -> &JsonMap<String, Value> {
		&self.claims
	}

	/// Looks up a raw claim by field name.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.claims.get(field)
	}

	/// Renders the profile as one JSON object with `provider` and `id` overlaid on the
	/// raw claims.
	pub fn to_value(&self) -> Value {
		let mut object = self.claims.clone();

		object.insert("provider".into(), Value::String(self.provider.as_str().to_owned()));

		if let Some(id) = &self.id {
			object.insert("id".into(), Value::String(id.clone()));
		}

		Value::Object(object)
	}
}
impl Serialize for UserProfile {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_value().serialize(serializer)
	}
}

/// Literal `id` fields win over the mapped field; a field that exists but is JSON null
/// counts as absent either way.
fn derive_id(claims: &JsonMap<String, Value>, mapping: &FieldMapping) -> Option<String> {
	if let Some(value) = claims.get("id").filter(|value| !value.is_null()) {
		return Some(stringify(value));
	}

	mapping
		.id
		.as_deref()
		.and_then(|field| claims.get(field))
		.filter(|value| !value.is_null())
		.map(stringify)
}

fn stringify(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn provider() -> ProviderId {
		ProviderId::new("acme").expect("Provider fixture should be valid.")
	}

	fn claims(json: Value) -> JsonMap<String, Value> {
		match json {
			Value::Object(map) => map,
			_ => panic!("Claims fixture must be an object."),
		}
	}

	#[test]
	fn literal_numeric_id_is_stringified() {
		let profile = UserProfile::normalize(
			provider(),
			&FieldMapping::default(),
			claims(serde_json::json!({ "id": 42 })),
		);

		assert_eq!(profile.id(), Some("42"));
	}

	#[test]
	fn mapped_field_derives_the_id() {
		let mapping = FieldMapping { id: Some("sub".into()) };
		let profile = UserProfile::normalize(
			provider(),
			&mapping,
			claims(serde_json::json!({ "sub": "abc" })),
		);

		assert_eq!(profile.id(), Some("abc"));
	}

	#[test]
	fn literal_id_wins_over_mapping() {
		let mapping = FieldMapping { id: Some("sub".into()) };
		let profile = UserProfile::normalize(
			provider(),
			&mapping,
			claims(serde_json::json!({ "id": "primary", "sub": "secondary" })),
		);

		assert_eq!(profile.id(), Some("primary"));
	}

	#[test]
	fn underivable_id_stays_absent() {
		let mapping = FieldMapping { id: Some("sub".into()) };
		let profile = UserProfile::normalize(
			provider(),
			&mapping,
			claims(serde_json::json!({ "name": "nobody", "sub": null })),
		);

		assert_eq!(profile.id(), None, "Null mapped fields must not produce an identifier.");
	}

	#[test]
	fn to_value_overlays_provider_and_id() {
		let mapping = FieldMapping { id: Some("sub".into()) };
		let profile = UserProfile::normalize(
			provider(),
			&mapping,
			claims(serde_json::json!({ "sub": "u9" })),
		);

		assert_eq!(
			profile.to_value(),
			serde_json::json!({ "provider": "acme", "id": "u9", "sub": "u9" }),
		);
	}
}
