use std::collections::BTreeMap;
use std::path::Path;

use derive_more::Deref;
use serde::Deserialize;

use crate::CvgenError;
use crate::CvgenResult;
use crate::loader;
use crate::points::PointFilter;
use crate::sections::SectionKind;

/// A named group of skills rendered on one line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillGroup {
	/// Category label, e.g. `Languages`.
	pub name: String,
	/// Skill keys resolved through the data store, in display order.
	#[serde(default)]
	pub content: Vec<String>,
}

/// A reference to a project, job or education record, with optional filters
/// on its points and an optional alternate title field.
///
/// A bare string is shorthand for `{ name: <string> }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSelection")]
pub struct EntrySelection {
	pub name: String,
	pub filter: PointFilter,
	/// Field of the entity used as its displayed title instead of `name`.
	pub title_key: Option<String>,
}

impl EntrySelection {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_filter(mut self, filter: PointFilter) -> Self {
		self.filter = filter;
		self
	}

	#[must_use]
	pub fn with_title_key(mut self, key: impl Into<String>) -> Self {
		self.title_key = Some(key.into());
		self
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelection {
	Name(String),
	Detailed {
		name: String,
		#[serde(default)]
		include: Option<Vec<String>>,
		#[serde(default)]
		exclude: Vec<String>,
		#[serde(default)]
		title_key: Option<String>,
	},
}

impl From<RawSelection> for EntrySelection {
	fn from(raw: RawSelection) -> Self {
		match raw {
			RawSelection::Name(name) => Self::new(name),
			RawSelection::Detailed {
				name,
				include,
				exclude,
				title_key,
			} => {
				Self {
					name,
					filter: PointFilter { include, exclude },
					title_key,
				}
			}
		}
	}
}

/// The selection of entities that make up one generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Recipe {
	/// Summary shown in the objective section.
	#[serde(default)]
	pub summary: Option<String>,
	#[serde(default)]
	pub skills: Vec<SkillGroup>,
	#[serde(default)]
	pub projects: Vec<EntrySelection>,
	#[serde(default)]
	pub experience: Vec<EntrySelection>,
	#[serde(default)]
	pub education: Vec<EntrySelection>,
}

impl Recipe {
	/// Whether the recipe selects anything for the given section.
	pub fn is_active(&self, kind: SectionKind) -> bool {
		match kind {
			SectionKind::Objective => self.summary.as_deref().is_some_and(|s| !s.is_empty()),
			SectionKind::Skills => !self.skills.is_empty(),
			SectionKind::Projects => !self.projects.is_empty(),
			SectionKind::Experience => !self.experience.is_empty(),
			SectionKind::Education => !self.education.is_empty(),
		}
	}

	/// Active sections in canonical document order.
	pub fn active_sections(&self) -> Vec<SectionKind> {
		SectionKind::ALL
			.into_iter()
			.filter(|kind| self.is_active(*kind))
			.collect()
	}
}

/// All recipes available to a project, keyed by name.
#[derive(Debug, Clone, Default, Deref)]
pub struct Recipes(BTreeMap<String, Recipe>);

impl Recipes {
	pub fn new(recipes: BTreeMap<String, Recipe>) -> Self {
		Self(recipes)
	}

	/// Load recipes from a single document keyed by recipe name, or from a
	/// directory containing one document per recipe (the file stem is the
	/// recipe name).
	pub fn load(path: &Path) -> CvgenResult<Self> {
		let recipes = if path.is_dir() {
			load_recipe_dir(path)?
		} else {
			let value = loader::load_document(path)?;
			loader::from_document(value, &path.display().to_string())?
		};

		tracing::debug!(path = %path.display(), count = recipes.len(), "loaded recipes");
		Ok(Self(recipes))
	}

	/// Find a recipe by name.
	pub fn get(&self, name: &str) -> CvgenResult<&Recipe> {
		self.0.get(name).ok_or_else(|| {
			let available = if self.0.is_empty() {
				"none".to_string()
			} else {
				self.names().collect::<Vec<_>>().join(", ")
			};

			CvgenError::RecipeNotFound {
				name: name.to_string(),
				available,
			}
		})
	}

	/// Recipe names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}

fn load_recipe_dir(dir: &Path) -> CvgenResult<BTreeMap<String, Recipe>> {
	let mut paths: Vec<_> = std::fs::read_dir(dir)?
		.filter_map(Result::ok)
		.map(|entry| entry.path())
		.filter(|path| path.is_file() && loader::is_supported_document(path))
		.collect();
	paths.sort();

	let mut recipes = BTreeMap::new();
	for path in paths {
		let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
			continue;
		};

		let value = loader::load_document(&path)?;
		let recipe: Recipe = loader::from_document(value, &path.display().to_string())?;
		recipes.insert(name.to_string(), recipe);
	}

	Ok(recipes)
}
