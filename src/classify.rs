use serde_json::Value;

use crate::config::AddressBook;
use crate::models::Category;

/// Lowercased address if `value` is a string, otherwise the empty string.
pub fn to_lower_addr(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(addr)) => addr.to_lowercase(),
        _ => String::new(),
    }
}

/// Buckets a destination by exact, case-insensitive match against the book.
pub fn classify_to_address(book: &AddressBook, to: Option<&Value>) -> Category {
    let low = to_lower_addr(to);
    if low == book.relay.address {
        Category::Relay
    } else if low == book.weth_helper.address {
        Category::WethHelper
    } else {
        Category::Other
    }
}
