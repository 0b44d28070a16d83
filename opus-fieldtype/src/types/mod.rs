//! Built-in field types.

mod boolean;
mod regex;
mod select;
mod text;

pub use self::boolean::BooleanType;
pub use self::regex::RegexType;
pub use self::select::SelectType;
pub use self::text::{TextType, TextareaType};
