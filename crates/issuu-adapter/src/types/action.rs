/*
[INPUT]:  API method names
[OUTPUT]: Action enum with wire names
[POS]:    Data layer - values of the `action` request parameter
[UPDATE]: When wrapping another API method
*/

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "issuu.documents.list")]
    ListDocuments,
    #[serde(rename = "issuu.document.delete")]
    DeleteDocuments,
    #[serde(rename = "issuu.folders.list")]
    ListFolders,
    #[serde(rename = "issuu.bookmarks.list")]
    ListBookmarks,
    #[serde(rename = "issuu.document_embeds.list")]
    ListDocumentEmbeds,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ListDocuments => "issuu.documents.list",
            Action::DeleteDocuments => "issuu.document.delete",
            Action::ListFolders => "issuu.folders.list",
            Action::ListBookmarks => "issuu.bookmarks.list",
            Action::ListDocumentEmbeds => "issuu.document_embeds.list",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
