use lifeguard_search::Searchable;

#[derive(Searchable)]
pub struct Tuple(String);

fn main() {}
