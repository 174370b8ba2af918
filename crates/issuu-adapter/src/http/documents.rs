/*
[INPUT]:  Action names and document identifiers
[OUTPUT]: API responses for the wrapped document/folder/bookmark methods
[POS]:    HTTP layer - typed helpers over IssuuClient::request
[UPDATE]: When wrapping another API method
*/

use serde_json::Value;

use crate::http::{IssuuClient, IssuuError, Result};
use crate::types::{Action, OptionField, ParamValue, PostData};

impl IssuuClient {
    /// List documents using the current filters (access, states, paging ...)
    ///
    /// GET action=issuu.documents.list
    pub async fn list_documents(&self) -> Result<Value> {
        self.list(Action::ListDocuments).await
    }

    /// GET action=issuu.folders.list
    pub async fn list_folders(&self) -> Result<Value> {
        self.list(Action::ListFolders).await
    }

    /// GET action=issuu.bookmarks.list
    pub async fn list_bookmarks(&self) -> Result<Value> {
        self.list(Action::ListBookmarks).await
    }

    /// GET action=issuu.document_embeds.list
    pub async fn list_document_embeds(&self) -> Result<Value> {
        self.list(Action::ListDocumentEmbeds).await
    }

    /// Delete documents by name
    ///
    /// POST action=issuu.document.delete&names={names}
    pub async fn delete_documents<I, S>(&self, names: I) -> Result<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(IssuuError::InvalidArgument {
                name: "names".to_string(),
                reason: "at least one document name is required".to_string(),
            });
        }

        let post_data = PostData::from([
            ("action".to_string(), ParamValue::from(Action::DeleteDocuments.as_str())),
            ("names".to_string(), ParamValue::from(names.join(","))),
        ]);
        self.request(Some(&post_data)).await
    }

    async fn list(&self, action: Action) -> Result<Value> {
        let options = self.options().with_field(OptionField::Action, action.as_str())?;
        self.execute(&options, None).await
    }
}
