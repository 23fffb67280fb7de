use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PaginationRequest {
    /// Clamp to sane bounds and derive the SQL offset.
    pub fn normalized(&self) -> (i64, i64) {
        let limit = self.limit.clamp(1, 100);
        let page = self.page.max(1);
        (limit, (page - 1) * limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::PaginationRequest;

    #[test]
    fn normalizes_out_of_range_values() {
        let (limit, offset) = PaginationRequest { page: 0, limit: 5000 }.normalized();
        assert_eq!(limit, 100);
        assert_eq!(offset, 0);

        let (limit, offset) = PaginationRequest { page: 3, limit: 10 }.normalized();
        assert_eq!(limit, 10);
        assert_eq!(offset, 20);
    }
}
