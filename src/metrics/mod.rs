/// Inertia and silhouette diagnostics
pub mod quality;
