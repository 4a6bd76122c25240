use lifeguard_search::Searchable;

#[derive(Searchable)]
#[table_name = "audit_log"]
pub struct AuditLog {
    #[search_skip]
    pub id: i64,
}

fn main() {}
