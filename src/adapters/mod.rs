pub mod local;
pub mod supabase;
