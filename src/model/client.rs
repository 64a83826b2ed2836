/// A barbershop client. Only its name matters to the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub name: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Client {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
