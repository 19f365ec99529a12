#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use prog8051::{
        ProgError,
        locate::{candidates, exe_name, locate_tool_for},
    };

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_candidate_order() {
        let root = Path::new("avrdude");
        let found = candidates(root, "linux", "x86_64");

        assert_eq!(
            found,
            vec![
                root.join("linux_x86_64").join("bin").join("avrdude"),
                root.join("linux").join("bin").join("avrdude"),
                root.join("bin").join("avrdude"),
                root.join("avrdude"),
            ]
        );
    }

    #[test]
    fn test_windows_exe_suffix() {
        assert_eq!(exe_name("windows"), "avrdude.exe");
        assert_eq!(exe_name("macos"), "avrdude");

        let found = candidates(Path::new("tools"), "windows", "x86_64");
        assert!(found.iter().all(|p| p.ends_with("avrdude.exe")));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("bin").join("avrdude"));
        touch(&root.join("avrdude"));
        assert_eq!(
            locate_tool_for(root, "linux", "aarch64").unwrap(),
            root.join("bin").join("avrdude")
        );

        touch(&root.join("linux_aarch64").join("bin").join("avrdude"));
        assert_eq!(
            locate_tool_for(root, "linux", "aarch64").unwrap(),
            root.join("linux_aarch64").join("bin").join("avrdude")
        );
    }

    #[test]
    fn test_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("linux").join("bin")).unwrap();

        match locate_tool_for(dir.path(), "linux", "x86_64") {
            Err(ProgError::ExecutableNotFound { root }) => assert_eq!(root, dir.path()),
            other => panic!("expected ExecutableNotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_sets_exec_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("avrdude");
        touch(&exe);
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o644)).unwrap();

        let found = locate_tool_for(dir.path(), "linux", "x86_64").unwrap();
        let mode = fs::metadata(found).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
