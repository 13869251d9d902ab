use std::fmt;

use crate::CvgenError;
use crate::CvgenResult;
use crate::data::DataStore;
use crate::data::EducationRecord;
use crate::data::EntityKind;
use crate::data::Notation;
use crate::points;
use crate::points::PointFilter;
use crate::points::PointGroup;
use crate::points::PointNode;
use crate::recipe::Recipe;
use crate::templates::TemplateName;
use crate::templates::TemplateSet;

/// Point key that introduces an education record's custom layout.
pub const MAIN_POINT_KEY: &str = "main";

/// Top-level divisions of the document, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
	Objective,
	Skills,
	Projects,
	Experience,
	Education,
}

impl SectionKind {
	pub const ALL: [Self; 5] = [
		Self::Objective,
		Self::Skills,
		Self::Projects,
		Self::Experience,
		Self::Education,
	];

	/// File stem of the generated section file.
	pub fn key(self) -> &'static str {
		match self {
			Self::Objective => "summary",
			Self::Skills => "skills",
			Self::Projects => "projects",
			Self::Experience => "experience",
			Self::Education => "education",
		}
	}

	/// Heading shown in the document.
	pub fn title(self) -> &'static str {
		match self {
			Self::Objective => "Objective",
			Self::Skills => "Skills",
			Self::Projects => "Projects",
			Self::Experience => "Experience",
			Self::Education => "Education",
		}
	}

	/// Awesome-CV environment wrapping the section body.
	pub fn layout(self) -> &'static str {
		match self {
			Self::Objective | Self::Skills => "cvparagraph",
			Self::Projects | Self::Experience | Self::Education => "cventries",
		}
	}

	/// Build the section body for `recipe`.
	pub fn build(
		self,
		recipe: &Recipe,
		data: &DataStore,
		templates: &TemplateSet,
	) -> CvgenResult<String> {
		tracing::debug!(section = %self, "building section");
		match self {
			Self::Objective => build_objective(recipe, data),
			Self::Skills => build_skills(recipe, data, templates),
			Self::Projects => build_projects(recipe, data, templates),
			Self::Experience => build_experience(recipe, data, templates),
			Self::Education => build_education(recipe, data, templates),
		}
	}
}

impl fmt::Display for SectionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// The named summary verbatim, or an empty body when none is named.
pub fn build_objective(recipe: &Recipe, data: &DataStore) -> CvgenResult<String> {
	match recipe.summary.as_deref().filter(|name| !name.is_empty()) {
		Some(name) => data.summary(name).map(str::to_string),
		None => Ok(String::new()),
	}
}

/// One bold-labelled line per skill group, joined by the line-break unit.
pub fn build_skills(
	recipe: &Recipe,
	data: &DataStore,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	let mut lines = Vec::with_capacity(recipe.skills.len());

	for group in &recipe.skills {
		let skills = group
			.content
			.iter()
			.map(|key| data.skill(key))
			.collect::<CvgenResult<Vec<_>>>()?;

		lines.push(templates.render(
			TemplateName::BoldItem,
			minijinja::context! { category => &group.name, content => skills.join(", ") },
		)?);
	}

	Ok(lines.join(templates.line_break()))
}

pub fn build_projects(
	recipe: &Recipe,
	data: &DataStore,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	let mut entries = String::new();

	for selection in &recipe.projects {
		let project = data.project(&selection.name)?;
		let mut fragments = Vec::new();

		if !project.tech.trim().is_empty() {
			let tech = templates.render(
				TemplateName::BoldItem,
				minijinja::context! { category => "Technologies", content => project.tech.as_str() },
			)?;
			fragments.push(templates.render(
				TemplateName::Bullet,
				minijinja::context! { item => tech },
			)?);
		}

		let rendered = points::render_points(&project.points, &selection.filter, templates)?;
		if !rendered.is_empty() {
			fragments.push(rendered);
		}

		entries.push_str(&templates.render(
			TemplateName::Project,
			minijinja::context! {
				href => project.href.as_str(),
				link => project.link.as_str(),
				name => project.name.as_str(),
				date => project.date.as_str(),
				content => fragments.join(templates.point_separator()),
			},
		)?);
	}

	Ok(entries)
}

pub fn build_experience(
	recipe: &Recipe,
	data: &DataStore,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	let mut entries = String::new();

	for selection in &recipe.experience {
		let job = data.job(&selection.name)?;
		let title = job.title(selection.title_key.as_deref()).ok_or_else(|| {
			CvgenError::MissingField {
				kind: EntityKind::Experience.to_string(),
				name: selection.name.clone(),
				field: selection.title_key.clone().unwrap_or_default(),
			}
		})?;
		let content = points::render_points(&job.points, &selection.filter, templates)?;

		entries.push_str(&templates.render(
			TemplateName::Experience,
			minijinja::context! {
				name => title,
				employer => job.employer.as_str(),
				date => job.date.as_str(),
				content => content,
			},
		)?);
	}

	Ok(entries)
}

pub fn build_education(
	recipe: &Recipe,
	data: &DataStore,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	let mut entries = String::new();

	for selection in &recipe.education {
		let record = data.education(&selection.name)?;
		let content = render_education_points(record, &selection.filter, templates)?;

		entries.push_str(&templates.render(
			TemplateName::Education,
			minijinja::context! {
				degree => record.degree.as_str(),
				institution => record.institution.as_str(),
				location => record.location.as_str(),
				date => record.date.as_str(),
				content => content,
			},
		)?);
	}

	Ok(entries)
}

/// Render an education record's points according to its notation.
///
/// Standard notation draws every leaf as a plain bullet. The custom layout
/// gives a top-level `main` point an introductory line followed by a bullet,
/// and draws group children one level deeper than their `main` sibling.
pub fn render_education_points(
	record: &EducationRecord,
	filter: &PointFilter,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	let mut lines = Vec::new();

	for (key, node) in filter.select(&record.points) {
		match (&record.notation, node) {
			(Notation::Standard, node) => {
				for leaf in node.leaves() {
					lines.push(points::render_bullet(leaf, 0, templates)?);
				}
			}
			(Notation::Custom(_), PointNode::Leaf(text)) => {
				if key == MAIN_POINT_KEY {
					lines.push(templates.render(
						TemplateName::IntroLine,
						minijinja::context! { item => text },
					)?);
				}
				lines.push(points::name_point(
					points::render_bullet(text, 1, templates),
					key,
				)?);
			}
			(Notation::Custom(_), PointNode::Group(group)) => {
				render_custom_group(group, 1, templates, &mut lines)?;
			}
		}
	}

	Ok(lines.join(templates.point_separator()))
}

fn render_custom_group(
	group: &PointGroup,
	level: usize,
	templates: &TemplateSet,
	lines: &mut Vec<String>,
) -> CvgenResult<()> {
	for (key, node) in group.iter() {
		match node {
			PointNode::Leaf(text) if key == MAIN_POINT_KEY => {
				lines.push(points::name_point(
					points::render_bullet(text, level, templates),
					key,
				)?);
			}
			PointNode::Leaf(text) => {
				lines.push(points::name_point(
					points::render_bullet(text, level + 1, templates),
					key,
				)?);
			}
			PointNode::Group(nested) => {
				render_custom_group(nested, level + 1, templates, lines)?;
			}
		}
	}

	Ok(())
}
