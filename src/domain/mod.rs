pub mod category;
pub mod marks;
pub mod student;

pub use category::{Category, CategoryEntry, CategoryError, CategoryTable};
pub use marks::{
    GradeBand, MarkComponent, MarkPolicy, Marks, MarksError, ScoreScale, ScoreSummary, Subtotal,
};
pub use student::{Programme, StudentInfo};
