//! Integration tests for the pacman_agents public API

use assert_matches::assert_matches;
use pacman_agents::{
    config::AgentConfig, AgentError, Maze, MazeError, PathError, Result, DESCRIPTION, NAME,
    VERSION,
};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "pacman_agents");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let config_error = AgentError::Config("bad value".to_string());
    assert_matches!(config_error, AgentError::Config(_));

    let path_error: AgentError = PathError::NodeOutOfRange {
        node: 7,
        node_count: 3,
    }
    .into();
    assert_matches!(path_error, AgentError::Path(PathError::NodeOutOfRange { node: 7, .. }));

    let maze_error: AgentError = Maze::from_layout(&["###"]).unwrap_err().into();
    assert_matches!(maze_error, AgentError::Maze(MazeError::Empty));
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert_eq!(success.unwrap(), 42);

    let failure: Result<i32> = Err(AgentError::Config("test".to_string()));
    assert!(failure.is_err());
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = AgentConfig::load(dir.path().join("absent.json"));
    assert_matches!(result, Err(AgentError::Io(_)));
}
