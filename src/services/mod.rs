// Catalog and fleet
pub mod products;
pub mod vehicles;

// Order lifecycle
pub mod delivery_proofs;
pub mod orders;

// Onboarding
pub mod checklist;

// Backorder dashboard
pub mod analytics;
