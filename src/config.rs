#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Config {
    /// 打印流水线的构建过程与终结操作的统计信息到标准错误。
    Verbose,
    /// `try_*`终结操作跳过错误元素，而不是在首个错误处停止。
    SkipErr,
}

#[inline]
pub(crate) fn is_verbose(configs: &[Config]) -> bool {
    configs.contains(&Config::Verbose)
}

#[inline]
pub(crate) fn skip_err(configs: &[Config]) -> bool {
    configs.contains(&Config::SkipErr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_helpers() {
        assert!(!is_verbose(&[]));
        assert!(!skip_err(&[]));
        assert!(is_verbose(&[Config::SkipErr, Config::Verbose]));
        assert!(!is_verbose(&[Config::SkipErr]));
        assert!(skip_err(&[Config::SkipErr]));
    }
}
