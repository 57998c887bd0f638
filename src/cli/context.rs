/// Per-invocation configuration, built once from the parsed arguments
/// and passed by reference to every handler.
pub struct Context {
    pub endpoint: String,
}

impl Context {
    pub fn new(matches: &clap::ArgMatches) -> Self {
        let endpoint = matches
            .get_one::<String>("kong-uri")
            .expect("kong-uri has a default")
            .clone();

        Self { endpoint }
    }
}
