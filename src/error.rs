use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error",
    ReadInput{path: String, source: std::io::Error} = "unable to read airport data from {path}",
    WriteOutput{path: String, source: std::io::Error} = "unable to write {path}",
    Json{path: String, source: serde_json::Error} = "malformed airport JSON in {path}",
    NotATable{path: String} = "{path} must hold a JSON object keyed by airport code",
    Render{source: serde_json::Error} = "unable to render airport JSON",
    ScriptOptions{reason: String} = "bad script options: {reason}",
    Hostname{reason: String} = "unable to determine hostname: {reason}"
}
