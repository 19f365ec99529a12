#[cfg(test)]
mod tests {
    use prog8051::{
        Operation, OperationRequest, build_args,
        args::default_config_path,
        constants::{NO_PORTS_FOUND, TOOL_ROOT},
    };
    use std::path::Path;

    fn default_conf() -> String {
        default_config_path(Path::new(TOOL_ROOT))
    }

    fn bare(operation: Operation) -> OperationRequest {
        let mut request = OperationRequest::new(operation);
        request.programmer = String::new();
        request.chip = String::new();
        request.baud = String::new();
        request
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_full_write_request() {
        let request = OperationRequest::new(Operation::Write)
            .with_port("/dev/ttyUSB0")
            .with_hex_file("blink.hex");

        assert_eq!(
            build_args(&request),
            strings(&[
                "-C",
                default_conf().as_str(),
                "-P",
                "/dev/ttyUSB0",
                "-b",
                "19200",
                "-c",
                "stk500v1",
                "-p",
                "at89s51",
                "-Uflash:w:blink.hex:i",
            ])
        );
    }

    #[test]
    fn test_no_flags_without_options() {
        let request = OperationRequest::new(Operation::Read)
            .with_port("COM3")
            .with_hex_file("dump.hex")
            .with_verbosity("0");

        let args = build_args(&request);
        for flag in ["-v", "-F", "-V", "-D", "-e", "-n"] {
            assert!(!args.iter().any(|a| a == flag), "unexpected {flag} in {args:?}");
        }
        assert_eq!(args.last().map(String::as_str), Some("-Uflash:r:dump.hex:i"));
    }

    #[test]
    fn test_flag_order_is_fixed() {
        let mut request = bare(Operation::Erase);
        request.force = true;
        request.disable_verify = true;
        request.disable_erase = true;
        request.do_not_write = true;
        request.verbosity = "2".into();

        assert_eq!(
            build_args(&request),
            strings(&[
                "-C",
                default_conf().as_str(),
                "-v",
                "-v",
                "-F",
                "-V",
                "-D",
                "-e",
                "-n",
            ])
        );
    }

    #[test]
    fn test_verbosity() {
        let count = |v: &str| {
            build_args(&bare(Operation::Erase).with_verbosity(v))
                .iter()
                .filter(|a| *a == "-v")
                .count()
        };

        assert_eq!(count(""), 0);
        assert_eq!(count("0"), 0);
        assert_eq!(count("1"), 1);
        assert_eq!(count("3"), 3);
        assert_eq!(count("4"), 4);
        assert_eq!(count("9"), 0);
        assert_eq!(count("high"), 0);

        let args = build_args(&bare(Operation::Erase).with_verbosity("3"));
        assert_eq!(&args[2..5], &strings(&["-v", "-v", "-v"])[..]);
    }

    #[test]
    fn test_placeholder_port_is_dropped() {
        let args = build_args(&bare(Operation::Erase).with_port(NO_PORTS_FOUND));
        assert!(!args.iter().any(|a| a == "-P"));
        assert!(!args.iter().any(|a| a == NO_PORTS_FOUND));

        let args = build_args(&bare(Operation::Erase).with_port(""));
        assert!(!args.iter().any(|a| a == "-P"));
    }

    #[test]
    fn test_baud_passes_through_verbatim() {
        let args = build_args(&bare(Operation::Erase).with_baud("fast"));
        assert_eq!(&args[2..], &strings(&["-e", "-b", "fast"])[..]);
    }

    #[test]
    fn test_config_override() {
        let mut request = bare(Operation::Erase);
        request.config_override = Some("/etc/avrdude.conf".into());
        assert_eq!(&build_args(&request)[..2], &strings(&["-C", "/etc/avrdude.conf"])[..]);

        request.config_override = Some("".into());
        assert_eq!(build_args(&request)[1], default_conf());
    }

    #[test]
    fn test_missing_hex_file_uses_stdio() {
        let args = build_args(&bare(Operation::Write));
        assert_eq!(args.last().map(String::as_str), Some("-Uflash:w:-:i"));

        let args = build_args(&bare(Operation::Write).with_hex_file(""));
        assert_eq!(args.last().map(String::as_str), Some("-Uflash:w:-:i"));

        let mut request = bare(Operation::Read).with_hex_file("dump.hex");
        request.use_file = false;
        let args = build_args(&request);
        assert_eq!(args.last().map(String::as_str), Some("-Uflash:r:-:i"));
    }

    #[test]
    fn test_erase_relies_on_global_flag() {
        let request = bare(Operation::Erase).with_hex_file("ignored.hex");
        let args = build_args(&request);

        assert_eq!(args, strings(&["-C", default_conf().as_str(), "-e"]));
        assert!(!args.iter().any(|a| a.starts_with("-U")));
    }

    #[test]
    fn test_default_config_lives_in_tool_root() {
        let expected = Path::new("avrdude").join("avrdude.conf");
        assert_eq!(default_conf(), expected.to_string_lossy());
    }

    #[test]
    fn test_default_config_follows_tool_root() {
        let dir = tempfile::tempdir().unwrap();
        let request = bare(Operation::Erase).with_tool_root(dir.path());

        let args = build_args(&request);
        let expected = dir.path().join("avrdude.conf");
        assert_eq!(args[1], expected.to_string_lossy());

        let mut request = request;
        request.config_override = Some("custom.conf".into());
        assert_eq!(build_args(&request)[1], "custom.conf");
    }
}
