/// 打印流水线的跟踪信息到标准错误，终端中以紫色显示。
macro_rules! println_trace {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            eprint!("\x1b[35m");
            eprint!($($arg)*);
            eprintln!("\x1b[0m");
        } else {
            eprintln!($($arg)*);
        }
    };
}

/// 打印`peek`观察到的元素到标准错误，终端中以蓝色加粗显示。
macro_rules! println_peek {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            eprint!("\x1b[1;34m");
            eprint!($($arg)*);
            eprintln!("\x1b[0m");
        } else {
            eprintln!($($arg)*);
        }
    };
}
