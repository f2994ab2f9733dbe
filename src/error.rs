#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("exception is not parseable: {reason}")]
    Unparseable { reason: String },

    #[error("asked for a heuristic on an exception that is not accepted: {classname}")]
    NotAccepted { classname: String },

    #[error("no heuristic matched {classname}; is the catchall missing from the list?")]
    NoHeuristic { classname: String },

    #[error("unknown semantic tag: {tag}")]
    UnknownTag { tag: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
