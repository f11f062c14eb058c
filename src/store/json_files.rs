//! Flat JSON file backend.

use std::fs;
use std::path::{Path, PathBuf};

use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

use super::QuestionRepository;
use crate::error::StoreError;
use crate::question::Question;

/// The question files, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SourceFile {
    /// Entertainment questions.
    #[strum(serialize = "preguntas_entretenimiento.json")]
    Entretenimiento,
    /// History questions.
    #[strum(serialize = "preguntas_historia.json")]
    Historia,
    /// Science questions.
    #[strum(serialize = "preguntas_ciencia.json")]
    Ciencia,
    /// General culture questions.
    #[strum(serialize = "preguntas_cultura_general.json")]
    CulturaGeneral,
    /// Sports questions.
    #[strum(serialize = "preguntas_deportes.json")]
    Deportes,
    /// Technology and internet questions.
    #[strum(serialize = "preguntas_tecnologia_y_internet.json")]
    TecnologiaYInternet,
    /// Society and health questions.
    #[strum(serialize = "preguntas_sociedad_y_salud.json")]
    SociedadYSalud,
    /// User-submitted questions; the only file ever written.
    #[strum(serialize = "preguntas_custom.json")]
    Custom,
}

/// Questions stored as JSON arrays, one file per [`SourceFile`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory the files live in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a source file.
    pub fn path_of(&self, source: SourceFile) -> PathBuf {
        self.data_dir.join(source.to_string())
    }

    /// Load a single source file.
    ///
    /// Returns `None` when the file is missing or blank.
    pub fn load_file(&self, source: SourceFile) -> Result<Option<Vec<Question>>, StoreError> {
        read_questions(&self.path_of(source))
    }
}

impl QuestionRepository for JsonFileStore {
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    fn load_all(&self) -> Result<Vec<Question>, StoreError> {
        let mut questions = Vec::new();

        for source in SourceFile::iter() {
            match self.load_file(source)? {
                Some(batch) => {
                    debug!(file = %source, count = batch.len(), "Loaded question file");
                    questions.extend(batch);
                }
                None => debug!(file = %source, "Skipping missing or empty file"),
            }
        }

        Ok(questions)
    }

    /// Re-reads the custom file from disk, appends, and rewrites it whole.
    #[instrument(skip(self, question), fields(id = question.id))]
    fn append(&self, question: &Question) -> Result<(), StoreError> {
        let path = self.path_of(SourceFile::Custom);

        let mut custom = read_questions(&path)?.unwrap_or_default();
        custom.push(question.clone());

        let json = serde_json::to_string_pretty(&custom)?;
        fs::write(&path, json).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), total = custom.len(), "Custom file rewritten");
        Ok(())
    }
}

fn read_questions(path: &Path) -> Result<Option<Vec<Question>>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, source: SourceFile, value: serde_json::Value) {
        fs::write(dir.path().join(source.to_string()), value.to_string()).unwrap();
    }

    fn question(id: u64, categoria: &str) -> Question {
        serde_json::from_value(json!({
            "id": id,
            "categoria": categoria,
            "opciones": ["A", "B"]
        }))
        .unwrap()
    }

    #[test]
    fn file_names_match_load_order() {
        let names: Vec<String> = SourceFile::iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "preguntas_entretenimiento.json",
                "preguntas_historia.json",
                "preguntas_ciencia.json",
                "preguntas_cultura_general.json",
                "preguntas_deportes.json",
                "preguntas_tecnologia_y_internet.json",
                "preguntas_sociedad_y_salud.json",
                "preguntas_custom.json",
            ]
        );
    }

    #[test]
    fn load_all_concatenates_in_file_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, SourceFile::Ciencia, json!([{ "id": 3, "categoria": "ciencia" }]));
        write(&dir, SourceFile::Historia, json!([{ "id": 2, "categoria": "historia" }]));
        write(&dir, SourceFile::Custom, json!([{ "id": 4, "categoria": "custom" }]));

        let questions = JsonFileStore::new(dir.path()).load_all().unwrap();
        let ids: Vec<u64> = questions.iter().map(|q| q.id).collect();

        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn missing_and_blank_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SourceFile::Deportes.to_string()), "  \n").unwrap();

        let store = JsonFileStore::new(dir.path());

        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.load_file(SourceFile::Deportes).unwrap(), None);
    }

    #[test]
    fn malformed_file_fails_loading() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SourceFile::Historia.to_string()), "[{ \"id\": ").unwrap();

        let err = JsonFileStore::new(dir.path()).load_all().unwrap_err();

        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("preguntas_historia.json"));
    }

    #[test]
    fn append_creates_custom_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.append(&question(1, "ciencia")).unwrap();

        let stored = store.load_file(SourceFile::Custom).unwrap().unwrap();
        assert_eq!(stored, vec![question(1, "ciencia")]);
    }

    #[test]
    fn append_rereads_disk_and_pretty_prints() {
        let dir = TempDir::new().unwrap();
        write(&dir, SourceFile::Custom, json!([{ "id": 10, "categoria": "historia" }]));
        let store = JsonFileStore::new(dir.path());

        store.append(&question(11, "ciencia")).unwrap();

        let raw = fs::read_to_string(store.path_of(SourceFile::Custom)).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": 10"));

        let ids: Vec<u64> = store
            .load_file(SourceFile::Custom)
            .unwrap()
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn append_leaves_category_files_alone() {
        let dir = TempDir::new().unwrap();
        write(&dir, SourceFile::Ciencia, json!([{ "id": 1, "categoria": "ciencia" }]));
        let store = JsonFileStore::new(dir.path());
        let before = fs::read_to_string(store.path_of(SourceFile::Ciencia)).unwrap();

        store.append(&question(2, "ciencia")).unwrap();

        let after = fs::read_to_string(store.path_of(SourceFile::Ciencia)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn append_keeps_field_order_of_existing_records() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SourceFile::Custom.to_string()),
            r#"[{"id": 7, "categoria": "arte", "zeta": 1, "pregunta": "?", "alfa": 2}]"#,
        )
        .unwrap();
        let store = JsonFileStore::new(dir.path());

        store.append(&question(8, "arte")).unwrap();

        let raw = fs::read_to_string(store.path_of(SourceFile::Custom)).unwrap();
        let zeta = raw.find("\"zeta\"").unwrap();
        let pregunta = raw.find("\"pregunta\"").unwrap();
        let alfa = raw.find("\"alfa\"").unwrap();
        assert!(zeta < pregunta && pregunta < alfa);
    }
}
