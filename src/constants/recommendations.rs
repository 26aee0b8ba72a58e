pub const EXCELLENT_RECOMMENDATION: &str = "Outstanding work! You have mastered this material. Try the advanced lessons of the course or help classmates who are still working through it.";

pub const GOOD_RECOMMENDATION: &str = "Good job! Review the questions you missed to close the remaining gaps before moving on.";

pub const SATISFACTORY_RECOMMENDATION: &str = "You passed, but there is room to improve. Revisit the course lessons covering the questions you missed and retake the quiz.";

pub const NEEDS_IMPROVEMENT_RECOMMENDATION: &str = "Work through the course material again, focusing on the fundamentals, and retake the quiz once you feel ready.";
