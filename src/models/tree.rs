use std::fmt::{self, Display, Formatter};

use crate::entity::Entity;

/// Renders a reply tree, one entity per line:
///
/// ```text
///   \_ "first" -/u/a
///  |   \_ "reply" -/u/b
///   \_ "second" -/u/c
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommentTree<'a>(
    /// The top-level entities.
    pub &'a [Entity],
);

impl Display for CommentTree<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_level(f, self.0, "")
    }
}

fn write_level(f: &mut Formatter<'_>, entities: &[Entity], depth: &str) -> fmt::Result {
    for (i, entity) in entities.iter().enumerate() {
        let text = match entity {
            Entity::Comment(c) => c.body(),
            Entity::Post(p) => p.title(),
        };
        writeln!(
            f,
            "{depth}  \\_ \"{}\" -/u/{}",
            text.replace('\n', " "),
            entity.common().author()
        )?;

        if !entity.children().is_empty() {
            let more = if i + 1 < entities.len() { " | " } else { "   " };
            write_level(f, entity.children(), &format!("{depth}{more}"))?;
        }
    }
    Ok(())
}
