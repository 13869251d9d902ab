use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use derive_more::Deref;
use serde::Deserialize;
use serde::Deserializer;
use serde::de;
use serde::de::Visitor;

use crate::CvgenError;
use crate::CvgenResult;
use crate::loader;
use crate::points::PointGroup;

/// The kinds of entity a recipe can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
	Summary,
	Skill,
	Project,
	Experience,
	Education,
}

impl EntityKind {
	/// Name of the collection in the data document.
	pub fn collection(self) -> &'static str {
		match self {
			Self::Summary => "summaries",
			Self::Skill => "skills",
			Self::Project => "projects",
			Self::Experience => "experience",
			Self::Education => "education",
		}
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.collection())
	}
}

/// A scalar text field. Numbers and booleans are accepted and kept as their
/// textual form so that `date: 2021` reads as `"2021"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Text(String);

impl Text {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Text {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl fmt::Display for Text {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Text {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(TextVisitor)
	}
}

struct TextVisitor;

impl Visitor<'_> for TextVisitor {
	type Value = Text;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a string, number or boolean")
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
		Ok(Text(v.to_string()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
		Ok(Text(v))
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
		Ok(Text(v.to_string()))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
		Ok(Text(v.to_string()))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
		Ok(Text(v.to_string()))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
		Ok(Text(v.to_string()))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
		Ok(Text::default())
	}

	fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
		Ok(Text::default())
	}
}

/// A project entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
	#[serde(default, alias = "title")]
	pub name: Text,
	#[serde(default)]
	pub href: Text,
	#[serde(default)]
	pub link: Text,
	#[serde(default)]
	pub date: Text,
	/// Technologies used. Rendered as an extra leading bullet when non-empty.
	#[serde(default)]
	pub tech: Text,
	#[serde(default)]
	pub points: PointGroup,
}

/// A job entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Job {
	/// Default display title.
	#[serde(default)]
	pub name: Text,
	#[serde(default)]
	pub employer: Text,
	#[serde(default)]
	pub date: Text,
	#[serde(default)]
	pub points: PointGroup,
	/// Any other fields, available as alternate titles through a recipe's
	/// `title_key`.
	#[serde(flatten)]
	pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Job {
	/// The display title: `name`, or the field called `title_key` when given.
	/// `employer` and `date` resolve to the named fields.
	/// Returns `None` when the requested field is missing or not a scalar.
	pub fn title(&self, title_key: Option<&str>) -> Option<String> {
		let key = match title_key {
			None | Some("name") => return Some(self.name.to_string()),
			Some("employer") => return Some(self.employer.to_string()),
			Some("date") => return Some(self.date.to_string()),
			Some(key) => key,
		};

		match self.fields.get(key)? {
			serde_json::Value::String(s) => Some(s.clone()),
			serde_json::Value::Number(n) => Some(n.to_string()),
			serde_json::Value::Bool(b) => Some(b.to_string()),
			_ => None,
		}
	}
}

/// How an education record's points are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Notation {
	/// One plain bullet per leaf, ignoring nesting.
	#[default]
	Standard,
	/// Degree-aware layout with an introductory `main` line and deeper
	/// indentation for sub-points.
	Custom(String),
}

impl<'de> Deserialize<'de> for Notation {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = Text::deserialize(deserializer)?;
		if value.is_empty() || value.as_str() == "standard" {
			Ok(Self::Standard)
		} else {
			Ok(Self::Custom(value.0))
		}
	}
}

/// An education entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationRecord {
	#[serde(default)]
	pub degree: Text,
	#[serde(default)]
	pub institution: Text,
	#[serde(default)]
	pub location: Text,
	#[serde(default)]
	pub date: Text,
	#[serde(default)]
	pub notation: Notation,
	#[serde(default)]
	pub points: PointGroup,
}

/// Every entity a recipe can draw from. Read-only for the duration of a run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataStore {
	#[serde(default)]
	pub summaries: HashMap<String, Text>,
	#[serde(default)]
	pub skills: HashMap<String, Text>,
	#[serde(default)]
	pub projects: HashMap<String, Project>,
	#[serde(default)]
	pub experience: HashMap<String, Job>,
	#[serde(default)]
	pub education: HashMap<String, EducationRecord>,
}

impl DataStore {
	/// Load the data store from a YAML, JSON or TOML document.
	pub fn load(path: &Path) -> CvgenResult<Self> {
		let value = loader::load_document(path)?;
		let store: Self = loader::from_document(value, &path.display().to_string())?;

		tracing::debug!(
			summaries = store.summaries.len(),
			skills = store.skills.len(),
			projects = store.projects.len(),
			experience = store.experience.len(),
			education = store.education.len(),
			"loaded data store"
		);

		Ok(store)
	}

	pub fn summary(&self, name: &str) -> CvgenResult<&str> {
		lookup(&self.summaries, EntityKind::Summary, name).map(Text::as_str)
	}

	pub fn skill(&self, name: &str) -> CvgenResult<&str> {
		lookup(&self.skills, EntityKind::Skill, name).map(Text::as_str)
	}

	pub fn project(&self, name: &str) -> CvgenResult<&Project> {
		lookup(&self.projects, EntityKind::Project, name)
	}

	pub fn job(&self, name: &str) -> CvgenResult<&Job> {
		lookup(&self.experience, EntityKind::Experience, name)
	}

	pub fn education(&self, name: &str) -> CvgenResult<&EducationRecord> {
		lookup(&self.education, EntityKind::Education, name)
	}
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: EntityKind, name: &str) -> CvgenResult<&'a T> {
	map.get(name).ok_or_else(|| {
		CvgenError::MissingEntity {
			kind: kind.to_string(),
			name: name.to_string(),
		}
	})
}
