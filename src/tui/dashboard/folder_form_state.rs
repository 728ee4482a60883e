/// Saisie d'un nouveau dossier pour un host.
pub struct FolderFormState {
    pub host: String,
    pub path: String,
    pub error: Option<String>,
}

impl FolderFormState {
    pub fn new(host: &str) -> Self {
        FolderFormState {
            host: host.to_string(),
            path: "/".to_string(),
            error: None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.error = None;
        self.path.push(c);
    }

    pub fn pop_char(&mut self) {
        self.error = None;
        self.path.pop();
    }

    /// Trimmed path, or an error to show in the form.
    pub fn validated(&self) -> Result<String, String> {
        let path = self.path.trim();
        if path.is_empty() {
            return Err("Path cannot be empty".to_string());
        }
        if !path.starts_with('/') {
            return Err("Use an absolute path (/srv/app); ~ is not expanded remotely".to_string());
        }
        Ok(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_root_and_validates() {
        let mut form = FolderFormState::new("orion");
        assert_eq!(form.validated().unwrap(), "/");
        form.pop_char();
        assert!(form.validated().is_err());
        for c in "srv/app".chars() {
            form.push_char(c);
        }
        assert!(form.validated().is_err());
        form.path = "~/proj".into();
        assert!(form.validated().is_err());
        form.path = " /srv/app ".into();
        assert_eq!(form.validated().unwrap(), "/srv/app");
    }
}
