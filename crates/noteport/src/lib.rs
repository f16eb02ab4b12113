//! noteport: publish notes as blog posts.
//!
//! noteport reads pages from a Logseq or Obsidian graph, turns their outliner structure
//! into ordinary markdown, rewrites wikilinks and image references, and writes the result
//! with a frontmatter block into the content folder of a static site generator.

#![warn(missing_docs)]

pub mod cli;
