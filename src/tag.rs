use crate::color::Color;
use crate::error::{Error, Result};
use crate::task::validated_name;
use crate::traits::Indexable;

/// A hierarchical label. A tag may list any number of parent tags; the parent
/// set keeps first-seen order and collapses duplicates, both at build time and
/// on whole-set replacement. Parent ids are opaque here: no cycle detection is
/// performed and nothing checks that the ids resolve to live tags.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Tag {
  id: uuid::Uuid,
  name: String,
  description: Option<String>,
  color: Color,
  parent_tag_ids: Vec<uuid::Uuid>,
}

impl Indexable for Tag {
  fn id(&self) -> uuid::Uuid {
    self.id
  }
}

impl Tag {
  pub fn builder() -> TagBuilder {
    TagBuilder::new()
  }

  pub fn name(&self) -> &str {
    self.name.as_str()
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn color(&self) -> Color {
    self.color
  }

  pub fn parent_tag_ids(&self) -> &[uuid::Uuid] {
    &self.parent_tag_ids
  }

  pub fn rename(&mut self, name: &str) -> Result<()> {
    self.name = validated_name(name)?;
    Ok(())
  }

  pub fn set_description(&mut self, description: Option<String>) {
    self.description = description;
  }

  pub fn set_color(&mut self, color: Color) {
    self.color = color;
  }

  /// Replaces the whole parent set; duplicates in the input collapse.
  pub fn set_parent_tag_ids(&mut self, parent_tag_ids: Vec<uuid::Uuid>) {
    self.parent_tag_ids = dedup_preserving_order(parent_tag_ids);
  }
}

pub struct TagBuilder {
  name: Option<String>,
  description: Option<String>,
  color: Color,
  parent_tag_ids: Vec<uuid::Uuid>,
}

impl TagBuilder {
  pub fn new() -> Self {
    Self {
      name: None,
      description: None,
      color: Color::default(),
      parent_tag_ids: Vec::new(),
    }
  }

  pub fn name(mut self, name: &str) -> Self {
    self.name = Some(name.to_owned());
    self
  }

  pub fn description(mut self, description: &str) -> Self {
    self.description = Some(description.to_owned());
    self
  }

  pub fn color(mut self, color: Color) -> Self {
    self.color = color;
    self
  }

  pub fn parent_tag_ids(mut self, parent_tag_ids: Vec<uuid::Uuid>) -> Self {
    self.parent_tag_ids = parent_tag_ids;
    self
  }

  pub fn build(self) -> Result<Tag> {
    let name = match self.name {
      Some(name) => validated_name(&name)?,
      None => return Err(Error::MissingRequiredField("name")),
    };

    return Ok(Tag {
      id: uuid::Uuid::new_v4(),
      name,
      description: self.description,
      color: self.color,
      parent_tag_ids: dedup_preserving_order(self.parent_tag_ids),
    });
  }
}

impl Default for TagBuilder {
  fn default() -> Self {
    Self::new()
  }
}

fn dedup_preserving_order(ids: Vec<uuid::Uuid>) -> Vec<uuid::Uuid> {
  let mut seen = Vec::with_capacity(ids.len());
  for id in ids {
    if !seen.contains(&id) {
      seen.push(id);
    }
  }
  return seen;
}
