//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod accessory_block_repo;
pub mod backup_repo;
pub mod category_repo;
pub mod dashboard_repo;
pub mod document_file_repo;
pub mod gallery_image_repo;
pub mod import_repo;
pub mod lead_repo;
pub mod menu_item_repo;
pub mod news_repo;
pub mod page_repo;
pub mod product_line_repo;
pub mod redirect_rule_repo;
pub mod service_repo;
pub mod setting_repo;
pub mod site_section_repo;
pub mod size_item_repo;
pub mod user_repo;

pub use accessory_block_repo::AccessoryBlockRepo;
pub use backup_repo::BackupRepo;
pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use document_file_repo::DocumentFileRepo;
pub use gallery_image_repo::GalleryImageRepo;
pub use import_repo::ImportRepo;
pub use lead_repo::LeadRepo;
pub use menu_item_repo::MenuItemRepo;
pub use news_repo::NewsRepo;
pub use page_repo::PageRepo;
pub use product_line_repo::ProductLineRepo;
pub use redirect_rule_repo::RedirectRuleRepo;
pub use service_repo::ServiceRepo;
pub use setting_repo::SettingRepo;
pub use site_section_repo::SiteSectionRepo;
pub use size_item_repo::SizeItemRepo;
pub use user_repo::UserRepo;
