// Export components
pub mod shift_templates;

// Re-export shift template handle
pub use shift_templates::ShiftTemplateHandle;
