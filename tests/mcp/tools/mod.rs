mod list;
mod query;
