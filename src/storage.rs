#[derive(Clone, Debug, PartialEq)]
pub struct Storage {
    pub data: Vec<f64>,
}

impl Storage {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
