use std::path::Path;
use std::path::PathBuf;

use crate::CvgenResult;
use crate::data::DataStore;
use crate::recipe::Recipe;
use crate::sections::SectionKind;
use crate::templates::TemplateName;
use crate::templates::TemplateSet;

/// File name of the entry-point document inside the build directory.
pub const ENTRY_POINT: &str = "resume.tex";
/// Directory, relative to the build directory, holding section files.
pub const SECTIONS_DIR: &str = "resume";

/// A generated section file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFile {
	pub kind: SectionKind,
	/// Full file content, wrapped in the section template.
	pub content: String,
}

impl SectionFile {
	/// Path relative to the build directory.
	pub fn relative_path(&self) -> PathBuf {
		Path::new(SECTIONS_DIR).join(format!("{}.tex", self.kind.key()))
	}
}

/// A fully rendered document, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	pub entry_point: String,
	/// Active sections in canonical order.
	pub sections: Vec<SectionFile>,
}

impl Document {
	/// Every file of the document as `(path relative to the build dir,
	/// content)`, entry point first.
	pub fn files(&self) -> Vec<(PathBuf, &str)> {
		let mut files = Vec::with_capacity(self.sections.len() + 1);
		files.push((PathBuf::from(ENTRY_POINT), self.entry_point.as_str()));
		files.extend(
			self.sections
				.iter()
				.map(|section| (section.relative_path(), section.content.as_str())),
		);
		files
	}

	pub fn section(&self, kind: SectionKind) -> Option<&SectionFile> {
		self.sections.iter().find(|section| section.kind == kind)
	}
}

/// Render every active section of `recipe` and the entry point referencing
/// them. Inactive sections produce no file and no reference.
pub fn assemble(
	recipe: &Recipe,
	data: &DataStore,
	templates: &TemplateSet,
) -> CvgenResult<Document> {
	let mut sections = Vec::new();
	let mut imports = String::new();

	for kind in recipe.active_sections() {
		let body = kind.build(recipe, data, templates)?;
		let content = templates.render(
			TemplateName::Section,
			minijinja::context! {
				section_name => kind.title(),
				section_type => kind.layout(),
				content => body,
			},
		)?;

		imports.push_str(&templates.render(
			TemplateName::Import,
			minijinja::context! { name => kind.key() },
		)?);
		sections.push(SectionFile { kind, content });
	}

	let entry_point = templates.render(
		TemplateName::Resume,
		minijinja::context! { content => imports },
	)?;

	Ok(Document {
		entry_point,
		sections,
	})
}

/// Recreate `build_dir` from scratch and write the document into it, copying
/// the style file alongside the entry point. Returns the written paths.
pub fn write_document(
	document: &Document,
	build_dir: &Path,
	style: Option<&Path>,
) -> CvgenResult<Vec<PathBuf>> {
	if build_dir.exists() {
		tracing::debug!(path = %build_dir.display(), "removing previous build");
		std::fs::remove_dir_all(build_dir)?;
	}
	std::fs::create_dir_all(build_dir.join(SECTIONS_DIR))?;

	let mut written = Vec::new();

	if let Some(style) = style {
		if let Some(file_name) = style.file_name() {
			let target = build_dir.join(file_name);
			std::fs::copy(style, &target)?;
			written.push(target);
		}
	}

	for (relative, content) in document.files() {
		let path = build_dir.join(relative);
		std::fs::write(&path, content)?;
		written.push(path);
	}

	tracing::info!(
		path = %build_dir.display(),
		files = written.len(),
		"wrote build directory"
	);

	Ok(written)
}
