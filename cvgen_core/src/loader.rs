use std::path::Path;

use crate::CvgenError;
use crate::CvgenResult;

/// File extensions accepted for data and recipe documents.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "toml"];

/// Returns `true` when the path has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_document(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| {
			SUPPORTED_EXTENSIONS
				.iter()
				.any(|supported| ext.eq_ignore_ascii_case(supported))
		})
}

/// Read a document from disk and parse it into a `serde_json::Value`, picking
/// the format from the file extension. Key order is preserved.
pub fn load_document(path: &Path) -> CvgenResult<serde_json::Value> {
	let content = std::fs::read_to_string(path).map_err(|e| CvgenError::DataFile {
		path: path.display().to_string(),
		reason: e.to_string(),
	})?;
	let format = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	tracing::debug!(path = %path.display(), %format, "loading document");
	parse_document(&content, &format, &path.display().to_string())
}

/// Parse a document's content into a `serde_json::Value` based on its format.
pub fn parse_document(
	content: &str,
	format: &str,
	path_display: &str,
) -> CvgenResult<serde_json::Value> {
	match format {
		"json" => serde_json::from_str(content).map_err(|e| CvgenError::DataFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		}),
		"toml" => {
			let toml_value: toml::Value =
				toml::from_str(content).map_err(|e| CvgenError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				})?;
			toml_to_json(toml_value, path_display)
		}
		"yaml" | "yml" => serde_yaml_ng::from_str(content).map_err(|e| CvgenError::DataFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		}),
		other => Err(CvgenError::UnsupportedDataFormat(other.to_string())),
	}
}

/// Deserialize a parsed document into a typed structure, reporting failures
/// against the originating file.
pub fn from_document<T>(value: serde_json::Value, path_display: &str) -> CvgenResult<T>
where
	T: serde::de::DeserializeOwned,
{
	serde_json::from_value(value).map_err(|e| CvgenError::DataFile {
		path: path_display.to_string(),
		reason: e.to_string(),
	})
}

/// Convert a `toml::Value` to a `serde_json::Value`.
fn toml_to_json(value: toml::Value, path_display: &str) -> CvgenResult<serde_json::Value> {
	let json = match value {
		toml::Value::String(s) => serde_json::Value::String(s),
		toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
		toml::Value::Float(f) => {
			serde_json::Value::Number(serde_json::Number::from_f64(f).ok_or_else(|| {
				CvgenError::DataFile {
					path: path_display.to_string(),
					reason: format!("unconvertible float value: {f}"),
				}
			})?)
		}
		toml::Value::Boolean(b) => serde_json::Value::Bool(b),
		toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
		toml::Value::Array(arr) => {
			let items: CvgenResult<Vec<serde_json::Value>> = arr
				.into_iter()
				.map(|v| toml_to_json(v, path_display))
				.collect();
			serde_json::Value::Array(items?)
		}
		toml::Value::Table(table) => {
			let mut map = serde_json::Map::new();
			for (k, v) in table {
				map.insert(k, toml_to_json(v, path_display)?);
			}
			serde_json::Value::Object(map)
		}
	};

	Ok(json)
}
