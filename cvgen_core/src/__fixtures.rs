use crate::data::DataStore;
use crate::data::EducationRecord;
use crate::data::Job;
use crate::data::Notation;
use crate::data::Project;
use crate::data::Text;
use crate::points::PointGroup;
use crate::points::PointNode;
use crate::recipe::EntrySelection;
use crate::recipe::Recipe;
use crate::recipe::SkillGroup;
use crate::templates::TemplateName;
use crate::templates::TemplateSet;

pub(crate) fn leaf(text: &str) -> PointNode {
	PointNode::Leaf(text.to_string())
}

pub(crate) fn group(entries: Vec<(&str, PointNode)>) -> PointNode {
	PointNode::Group(points(entries))
}

pub(crate) fn points(entries: Vec<(&str, PointNode)>) -> PointGroup {
	entries.into_iter().collect()
}

/// Markup-free templates so assertions read as plain text.
pub(crate) fn plain_templates() -> TemplateSet {
	TemplateSet::builtin()
		.with_template(TemplateName::Bullet, "- {{ item }}")
		.with_template(TemplateName::IndentedBullet, "{{ indent }}> {{ item }}")
		.with_template(TemplateName::BoldItem, "{{ category }}: {{ content }}")
		.with_template(TemplateName::IntroLine, "# {{ item }}")
		.with_template(
			TemplateName::Project,
			"[{{ name }}|{{ href }}|{{ link }}|{{ date }}]\n{{ content }}\n",
		)
		.with_template(
			TemplateName::Experience,
			"[{{ name }}|{{ employer }}|{{ date }}]\n{{ content }}\n",
		)
		.with_template(
			TemplateName::Education,
			"[{{ degree }}|{{ institution }}|{{ location }}|{{ date }}]\n{{ content }}\n",
		)
		.with_template(
			TemplateName::Section,
			"== {{ section_name }} ({{ section_type }})\n{{ content }}\n",
		)
		.with_template(TemplateName::Import, "import {{ name }}\n")
		.with_template(TemplateName::Resume, "BEGIN\n{{ content }}END\n")
}

pub(crate) fn skill_group(name: &str, content: &[&str]) -> SkillGroup {
	SkillGroup {
		name: name.to_string(),
		content: content.iter().map(ToString::to_string).collect(),
	}
}

pub(crate) fn sample_data() -> DataStore {
	let mut data = DataStore::default();

	data.summaries
		.insert("general".to_string(), Text::from("Builds tools."));
	data.skills.insert("a".to_string(), Text::from("Alpha"));
	data.skills.insert("b".to_string(), Text::from("Beta"));
	data.skills.insert("c".to_string(), Text::from("Gamma"));

	data.projects.insert(
		"cvgen".to_string(),
		Project {
			name: Text::from("cvgen"),
			href: Text::from("https://example.com"),
			link: Text::from("example.com"),
			date: Text::from("2024"),
			tech: Text::from("Rust"),
			points: points(vec![("p1", leaf("First")), ("p2", leaf("Second"))]),
		},
	);
	data.projects.insert(
		"notes".to_string(),
		Project {
			name: Text::from("notes"),
			href: Text::from("https://notes.example.com"),
			link: Text::from("notes.example.com"),
			date: Text::from("2023"),
			tech: Text::default(),
			points: points(vec![("p1", leaf("Wrote notes")), ("p2", leaf("Shared notes"))]),
		},
	);

	data.experience.insert(
		"acme".to_string(),
		Job {
			name: Text::from("Software Engineer"),
			employer: Text::from("Acme"),
			date: Text::from("2021"),
			points: points(vec![
				("build", leaf("Built things")),
				("lead", leaf("Led people")),
				(
					"tools",
					group(vec![("cli", leaf("Wrote a CLI")), ("ci", leaf("Fixed CI"))]),
				),
			]),
			fields: serde_json::Map::from_iter([(
				"short_title".to_string(),
				serde_json::Value::from("Engineer"),
			)]),
		},
	);

	data.education.insert(
		"uni".to_string(),
		EducationRecord {
			degree: Text::from("B.Sc."),
			institution: Text::from("Uni"),
			location: Text::from("Lagos"),
			date: Text::from("2020"),
			notation: Notation::Standard,
			points: points(vec![("p1", leaf("Did X")), ("p2", leaf("Did Y"))]),
		},
	);
	data.education.insert(
		"masters".to_string(),
		EducationRecord {
			degree: Text::from("M.Sc."),
			institution: Text::from("Tech"),
			location: Text::from("Berlin"),
			date: Text::from("2022"),
			notation: Notation::Custom("custom".to_string()),
			points: points(vec![
				("main", leaf("Masters in X")),
				(
					"research",
					group(vec![("main", leaf("Research")), ("detail", leaf("Thesis"))]),
				),
				("extra", leaf("Extra")),
			]),
		},
	);

	data
}

pub(crate) fn full_recipe() -> Recipe {
	Recipe {
		summary: Some("general".to_string()),
		skills: vec![
			skill_group("Languages", &["a", "b"]),
			skill_group("Tools", &["c"]),
		],
		projects: vec![EntrySelection::new("cvgen")],
		experience: vec![EntrySelection::new("acme")],
		education: vec![EntrySelection::new("uni")],
	}
}
