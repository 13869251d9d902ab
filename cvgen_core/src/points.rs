use std::fmt;

use derive_more::Deref;
use serde::Deserialize;
use serde::Deserializer;
use serde::de;
use serde::de::MapAccess;
use serde::de::SeqAccess;
use serde::de::Visitor;

use crate::CvgenError;
use crate::CvgenResult;
use crate::templates::TemplateName;
use crate::templates::TemplateSet;

/// A node in a points tree: either a single bullet or an ordered group of
/// nested bullets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointNode {
	Leaf(String),
	Group(PointGroup),
}

impl PointNode {
	/// All leaf texts reachable from this node, in document order.
	pub fn leaves(&self) -> Vec<&str> {
		match self {
			Self::Leaf(text) => vec![text.as_str()],
			Self::Group(group) => group.iter().flat_map(|(_, node)| node.leaves()).collect(),
		}
	}
}

/// An ordered mapping from point key to child node. Keys keep the order they
/// were written in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct PointGroup(Vec<(String, PointNode)>);

impl PointGroup {
	pub fn new(entries: Vec<(String, PointNode)>) -> Self {
		Self(entries)
	}

	pub fn get(&self, key: &str) -> Option<&PointNode> {
		self.0
			.iter()
			.find_map(|(name, node)| (name == key).then_some(node))
	}
}

impl<K: Into<String>> FromIterator<(K, PointNode)> for PointGroup {
	fn from_iter<I: IntoIterator<Item = (K, PointNode)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

impl<'de> Deserialize<'de> for PointNode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(PointNodeVisitor)
	}
}

impl<'de> Deserialize<'de> for PointGroup {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match PointNode::deserialize(deserializer)? {
			PointNode::Group(group) => Ok(group),
			PointNode::Leaf(text) => {
				Err(de::Error::custom(format!(
					"expected a mapping of points, found `{text}`"
				)))
			}
		}
	}
}

struct PointNodeVisitor;

impl<'de> Visitor<'de> for PointNodeVisitor {
	type Value = PointNode;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		formatter.write_str("a point or a mapping of nested points")
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
		Ok(PointNode::Leaf(v.to_string()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
		Ok(PointNode::Leaf(v))
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
		Ok(PointNode::Leaf(v.to_string()))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
		Ok(PointNode::Leaf(v.to_string()))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
		Ok(PointNode::Leaf(v.to_string()))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
		Ok(PointNode::Leaf(v.to_string()))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
		Ok(PointNode::Group(PointGroup::default()))
	}

	fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
		self.visit_unit()
	}

	/// Lists are keyed by their zero-based index.
	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
		let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(node) = seq.next_element::<PointNode>()? {
			entries.push((entries.len().to_string(), node));
		}
		Ok(PointNode::Group(PointGroup(entries)))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
		let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
		while let Some((key, node)) = map.next_entry::<String, PointNode>()? {
			entries.push((key, node));
		}
		Ok(PointNode::Group(PointGroup(entries)))
	}
}

/// Allow/deny lists applied to the keys of whichever group is being
/// expanded. `exclude` always wins over `include`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PointFilter {
	/// When set, only these keys are visited, in this order.
	#[serde(default)]
	pub include: Option<Vec<String>>,
	#[serde(default)]
	pub exclude: Vec<String>,
}

impl PointFilter {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn include<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.include = Some(keys.into_iter().map(Into::into).collect());
		self
	}

	#[must_use]
	pub fn exclude<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude = keys.into_iter().map(Into::into).collect();
		self
	}

	pub fn is_excluded(&self, key: &str) -> bool {
		self.exclude.iter().any(|excluded| excluded == key)
	}

	/// The children of `group` to visit, in visiting order. Keys named more
	/// than once by `include` are visited once.
	pub fn select<'a>(&'a self, group: &'a PointGroup) -> Vec<(&'a str, &'a PointNode)> {
		let candidates: Vec<(&str, &PointNode)> = match &self.include {
			Some(include) => {
				let mut seen: Vec<&str> = Vec::with_capacity(include.len());
				include
					.iter()
					.filter_map(|key| {
						if seen.contains(&key.as_str()) {
							return None;
						}
						seen.push(key.as_str());
						group.get(key).map(|node| (key.as_str(), node))
					})
					.collect()
			}
			None => group.iter().map(|(key, node)| (key.as_str(), node)).collect(),
		};

		candidates
			.into_iter()
			.filter(|(key, _)| !self.is_excluded(key))
			.collect()
	}
}

/// How a bullet at a given depth is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
	/// Top-level bullet.
	Plain,
	/// Nested bullet shifted right by `step` millimetres.
	Indented { step: u32 },
}

/// Render the children of a root points group. Root children sit at depth 0.
pub fn render_points(
	group: &PointGroup,
	filter: &PointFilter,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	render_group(group, filter, 0, templates)
}

/// Render a single node. A leaf becomes one bullet styled for `depth`; a
/// group renders its selected children one level deeper.
pub fn render(
	node: &PointNode,
	filter: &PointFilter,
	depth: usize,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	match node {
		PointNode::Leaf(text) => render_bullet(text, depth, templates),
		PointNode::Group(group) => render_group(group, filter, depth + 1, templates),
	}
}

/// Render the selected children of `group` at `depth` and join them with the
/// point separator. Empty fragments are skipped so no stray separators
/// appear.
pub fn render_group(
	group: &PointGroup,
	filter: &PointFilter,
	depth: usize,
	templates: &TemplateSet,
) -> CvgenResult<String> {
	let mut fragments = Vec::new();
	for (key, node) in filter.select(group) {
		let fragment = match node {
			PointNode::Leaf(text) => name_point(render_bullet(text, depth, templates), key)?,
			PointNode::Group(_) => render(node, filter, depth, templates)?,
		};
		if !fragment.is_empty() {
			fragments.push(fragment);
		}
	}

	Ok(fragments.join(templates.point_separator()))
}

/// Render one bullet of text for the given nesting depth. The bullet has no
/// key here, so a [`CvgenError::IndentTooDeep`] names it by its text; callers
/// holding the key replace it with [`name_point`].
pub fn render_bullet(text: &str, depth: usize, templates: &TemplateSet) -> CvgenResult<String> {
	match templates.indent_style_for(depth) {
		Some(IndentStyle::Plain) => {
			templates.render(TemplateName::Bullet, minijinja::context! { item => text })
		}
		Some(IndentStyle::Indented { step }) => {
			templates.render(
				TemplateName::IndentedBullet,
				minijinja::context! { item => text, indent => step },
			)
		}
		None => {
			Err(CvgenError::IndentTooDeep {
				key: text.to_string(),
				depth,
				max: templates.max_depth(),
			})
		}
	}
}

/// Name the point behind a [`CvgenError::IndentTooDeep`] by its key.
pub fn name_point(result: CvgenResult<String>, key: &str) -> CvgenResult<String> {
	result.map_err(|err| {
		match err {
			CvgenError::IndentTooDeep { depth, max, .. } => {
				CvgenError::IndentTooDeep {
					key: key.to_string(),
					depth,
					max,
				}
			}
			other => other,
		}
	})
}
