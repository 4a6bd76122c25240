use lifeguard_search::Searchable;

#[derive(Searchable)]
#[table_name = "posts"]
pub struct Post {
    pub title: String,
    pub _title: String,
}

fn main() {}
