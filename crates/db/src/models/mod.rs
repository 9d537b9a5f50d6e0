//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod accessory_block;
pub mod backup;
pub mod category;
pub mod dashboard;
pub mod document_file;
pub mod gallery_image;
pub mod lead;
pub mod menu_item;
pub mod news;
pub mod page;
pub mod product_line;
pub mod redirect_rule;
pub mod service;
pub mod setting;
pub mod site_section;
pub mod size_item;
pub mod user;
