//! Named, overridable templates used to assemble the document.
//!
//! Every piece of literal markup the generator emits comes from a
//! [`TemplateSet`]. The built-in set targets the Awesome-CV LaTeX class;
//! any template can be replaced by dropping a file named after it (for example
//! `templates/project.tex`) into the configured templates directory.
//!
//! Templates are rendered with [`minijinja`] using strict undefined behavior,
//! so a template referencing an unknown placeholder fails loudly instead of
//! rendering an empty string. Because LaTeX groups use braces, placeholders
//! inside a group are written with whitespace control, e.g.
//! `\textbf{ {{- category -}} }`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::CvgenError;
use crate::CvgenResult;
use crate::config::MarkupConfig;
use crate::points::IndentStyle;

/// Line-break unit placed between skill groups.
pub const DEFAULT_LINE_BREAK: &str = " \\\\\n";
/// Separator placed between rendered bullets.
pub const DEFAULT_POINT_SEPARATOR: &str = "\n";
/// Indent, in millimetres, for nesting depths 1 through 4.
pub const DEFAULT_INDENT_STEPS: [u32; 4] = [1, 5, 9, 13];

const RESUME_TEMPLATE: &str = r"\documentclass[11pt, a4paper]{awesome-cv}

\geometry{left=1.4cm, top=.8cm, right=1.4cm, bottom=1.8cm, footskip=.5cm}
\colorlet{awesome}{awesome-red}
\setbool{acvSectionColorHighlight}{true}
\renewcommand{\acvHeaderSocialSep}{\quad\textbar\quad}

\name{Your}{Name}
\email{you@example.com}

\begin{document}

\makecvheader

{{ content }}
\end{document}
";

const SECTION_TEMPLATE: &str = r"\cvsection{ {{- section_name -}} }

\begin{ {{- section_type -}} }
{{ content }}
\end{ {{- section_type -}} }
";

const PROJECT_TEMPLATE: &str = r"  \cventry
    { {{- name -}} }
    {\href{ {{- href -}} }{ {{- link -}} }}
    {}
    { {{- date -}} }
    {
      \begin{cvitems}
{{ content }}
      \end{cvitems}
    }
";

const EXPERIENCE_TEMPLATE: &str = r"  \cventry
    { {{- name -}} }
    { {{- employer -}} }
    {}
    { {{- date -}} }
    {
      \begin{cvitems}
{{ content }}
      \end{cvitems}
    }
";

const EDUCATION_TEMPLATE: &str = r"  \cventry
    { {{- degree -}} }
    { {{- institution -}} }
    { {{- location -}} }
    { {{- date -}} }
    {
      \begin{cvitems}
{{ content }}
      \end{cvitems}
    }
";

const IMPORT_TEMPLATE: &str = "\\input{resume/{{ name }}.tex}\n";
const BOLD_ITEM_TEMPLATE: &str = r"\textbf{ {{- category -}} }: {{ content }}";
const BULLET_TEMPLATE: &str = r"\item { {{- item -}} }";
const INDENTED_BULLET_TEMPLATE: &str =
	r"\hspace{ {{- indent -}} mm} \bullet \hspace{1mm} {{ item }} \newline";
const INTRO_LINE_TEMPLATE: &str = r"{{ item }} \newline";

/// Every template the generator renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateName {
	/// Entry-point document. Placeholder: `content`.
	Resume,
	/// Section wrapper. Placeholders: `section_name`, `section_type`, `content`.
	Section,
	/// Project entry. Placeholders: `href`, `link`, `name`, `date`, `content`.
	Project,
	/// Job entry. Placeholders: `name`, `employer`, `date`, `content`.
	Experience,
	/// Education entry. Placeholders: `degree`, `institution`, `location`,
	/// `date`, `content`.
	Education,
	/// Reference to a section file. Placeholder: `name`.
	Import,
	/// Bold label followed by text. Placeholders: `category`, `content`.
	BoldItem,
	/// Top-level bullet. Placeholder: `item`.
	Bullet,
	/// Nested bullet. Placeholders: `item`, `indent`.
	IndentedBullet,
	/// Introductory education line. Placeholder: `item`.
	IntroLine,
}

impl TemplateName {
	pub const ALL: [Self; 10] = [
		Self::Resume,
		Self::Section,
		Self::Project,
		Self::Experience,
		Self::Education,
		Self::Import,
		Self::BoldItem,
		Self::Bullet,
		Self::IndentedBullet,
		Self::IntroLine,
	];

	/// Templates that describe whole documents or entries, as opposed to
	/// single markup tokens. These are the ones `cvgen init` writes out.
	pub const DOCUMENT: [Self; 5] = [
		Self::Resume,
		Self::Section,
		Self::Project,
		Self::Experience,
		Self::Education,
	];

	pub fn key(self) -> &'static str {
		match self {
			Self::Resume => "resume",
			Self::Section => "section",
			Self::Project => "project",
			Self::Experience => "experience",
			Self::Education => "education",
			Self::Import => "import",
			Self::BoldItem => "bold_item",
			Self::Bullet => "bullet",
			Self::IndentedBullet => "indented_bullet",
			Self::IntroLine => "intro_line",
		}
	}

	/// File name looked up in the templates directory.
	pub fn file_name(self) -> String {
		format!("{}.tex", self.key())
	}

	pub fn builtin_source(self) -> &'static str {
		match self {
			Self::Resume => RESUME_TEMPLATE,
			Self::Section => SECTION_TEMPLATE,
			Self::Project => PROJECT_TEMPLATE,
			Self::Experience => EXPERIENCE_TEMPLATE,
			Self::Education => EDUCATION_TEMPLATE,
			Self::Import => IMPORT_TEMPLATE,
			Self::BoldItem => BOLD_ITEM_TEMPLATE,
			Self::Bullet => BULLET_TEMPLATE,
			Self::IndentedBullet => INDENTED_BULLET_TEMPLATE,
			Self::IntroLine => INTRO_LINE_TEMPLATE,
		}
	}
}

impl fmt::Display for TemplateName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// The templates and separators used to assemble one document.
#[derive(Debug, Clone)]
pub struct TemplateSet {
	sources: HashMap<TemplateName, String>,
	line_break: String,
	point_separator: String,
	indent_steps: Vec<u32>,
}

impl Default for TemplateSet {
	fn default() -> Self {
		Self::builtin()
	}
}

impl TemplateSet {
	/// The built-in Awesome-CV templates.
	pub fn builtin() -> Self {
		let sources = TemplateName::ALL
			.iter()
			.map(|name| (*name, name.builtin_source().to_string()))
			.collect();

		Self {
			sources,
			line_break: DEFAULT_LINE_BREAK.to_string(),
			point_separator: DEFAULT_POINT_SEPARATOR.to_string(),
			indent_steps: DEFAULT_INDENT_STEPS.to_vec(),
		}
	}

	/// Start from the built-in set, apply `[markup]` overrides, then replace
	/// any template that has a matching file in `dir`.
	pub fn load(dir: Option<&Path>, markup: &MarkupConfig) -> CvgenResult<Self> {
		let mut set = Self::builtin();

		if let Some(line_break) = &markup.line_break {
			set.line_break.clone_from(line_break);
		}
		if let Some(separator) = &markup.point_separator {
			set.point_separator.clone_from(separator);
		}
		if let Some(steps) = &markup.indent_steps {
			set.indent_steps.clone_from(steps);
		}

		let Some(dir) = dir else {
			return Ok(set);
		};

		for name in TemplateName::ALL {
			let path = dir.join(name.file_name());
			if !path.is_file() {
				continue;
			}

			tracing::debug!(template = %name, path = %path.display(), "using template override");
			let source = std::fs::read_to_string(&path).map_err(|e| {
				CvgenError::TemplateFile {
					path: path.display().to_string(),
					reason: e.to_string(),
				}
			})?;
			set.sources.insert(name, source);
		}

		Ok(set)
	}

	#[must_use]
	pub fn with_template(mut self, name: TemplateName, source: impl Into<String>) -> Self {
		self.sources.insert(name, source.into());
		self
	}

	#[must_use]
	pub fn with_line_break(mut self, line_break: impl Into<String>) -> Self {
		self.line_break = line_break.into();
		self
	}

	#[must_use]
	pub fn with_point_separator(mut self, separator: impl Into<String>) -> Self {
		self.point_separator = separator.into();
		self
	}

	#[must_use]
	pub fn with_indent_steps(mut self, steps: Vec<u32>) -> Self {
		self.indent_steps = steps;
		self
	}

	pub fn source(&self, name: TemplateName) -> &str {
		self.sources
			.get(&name)
			.map_or_else(|| name.builtin_source(), String::as_str)
	}

	pub fn line_break(&self) -> &str {
		&self.line_break
	}

	pub fn point_separator(&self) -> &str {
		&self.point_separator
	}

	/// Deepest nesting level that can still be drawn.
	pub fn max_depth(&self) -> usize {
		self.indent_steps.len()
	}

	/// Style for a bullet at `depth`, or `None` past [`Self::max_depth`].
	pub fn indent_style_for(&self, depth: usize) -> Option<IndentStyle> {
		if depth == 0 {
			return Some(IndentStyle::Plain);
		}

		self.indent_steps
			.get(depth - 1)
			.map(|step| IndentStyle::Indented { step: *step })
	}

	/// Render the named template with the given context.
	pub fn render<S: Serialize>(&self, name: TemplateName, ctx: S) -> CvgenResult<String> {
		let file_name = name.file_name();
		let mut env = minijinja::Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
		env.add_template(&file_name, self.source(name))
			.map_err(|e| CvgenError::TemplateRender(format!("{name}: {e}")))?;

		let template = env
			.get_template(&file_name)
			.map_err(|e| CvgenError::TemplateRender(format!("{name}: {e}")))?;

		template
			.render(ctx)
			.map_err(|e| CvgenError::TemplateRender(format!("{name}: {e}")))
	}
}
