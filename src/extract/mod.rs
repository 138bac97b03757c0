// src/extract/mod.rs
// =============================================================================
// This module finds links inside downloaded content.
//
// Submodules:
// - html: Pulls resource links out of HTML pages
//
// Rust concepts:
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod html;

pub use html::extract_links;
