//! Python sources used across integration tests

/// Fully documented, simple module
pub const DOCUMENTED: &str = r#""""
Simple test module.
"""

def hello(name):
    """Say hello to someone."""
    return f"Hello, {name}!"

class TestClass:
    """A test class."""

    def method(self):
        """A method."""
        return "test"
"#;

/// Undocumented module with branching and duplicated blocks
pub const MESSY: &str = r#"def process(items, flag, mode):
    total = 0
    for item in items:
        if item > 0 and flag:
            total += item
        elif item < 0 or mode == "strict":
            total -= item
    try:
        value = total / len(items)
    except ZeroDivisionError:
        value = 0
    return value

def process_again(items):
    total = 0
    for item in items:
        if item > 0 and flag:
            total += item
    return total
"#;

/// Not valid Python
pub const BROKEN: &str = "def f(:\n    pass\n";
