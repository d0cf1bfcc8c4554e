//! Begin/complete pairs for the archive import and deck analysis flows
//!
//! Both flows suspend while an external collaborator works. The begin half
//! checks preconditions and raises a busy flag; the complete half always
//! lowers it, whatever the outcome.

use super::DeckStore;
use crate::analysis::{AnalysisError, AnalysisRequest, DeckAnalyzer};
use crate::db::DeckRepository;
use crate::import::{ArchiveError, ExtractedImage, ImageExtractor, ImportError, ImportForm, build_deck};
use crate::model::DeckId;
use crate::mutations;
use crate::shuffle::RandomSource;
use tracing::{debug, info, warn};

/// Proof that an import was started; redeemed by `complete_import`
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct ImportTicket {
    id: u64,
}

impl<R: DeckRepository, G: RandomSource> DeckStore<R, G> {
    /// Whether an archive import is in flight
    #[must_use]
    pub const fn is_importing(&self) -> bool {
        self.import_pending
    }

    /// Whether an analysis is in flight for `deck`
    #[must_use]
    pub fn is_analyzing(&self, deck: &DeckId) -> bool {
        self.analyses_pending.contains(deck)
    }

    /// Start an import
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Busy` while another import is pending.
    pub fn begin_import(&mut self) -> Result<ImportTicket, ImportError> {
        if self.import_pending {
            return Err(ImportError::Busy);
        }
        self.import_pending = true;
        self.next_ticket += 1;
        debug!(ticket = self.next_ticket, "import started");
        Ok(ImportTicket { id: self.next_ticket })
    }

    /// Release a ticket without importing anything
    pub fn abandon_import(&mut self, ticket: ImportTicket) {
        debug!(ticket = ticket.id, "import abandoned");
        self.import_pending = false;
    }

    /// Finish an import with the extractor's outcome
    ///
    /// The new deck goes to the front of the collection. On any error the
    /// collection is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if extraction failed, the form is invalid or no
    /// card images were found.
    pub fn complete_import(
        &mut self,
        ticket: ImportTicket,
        extraction: Result<Vec<ExtractedImage>, ArchiveError>,
        form: ImportForm,
    ) -> Result<DeckId, ImportError> {
        self.import_pending = false;

        let deck = extraction
            .map_err(ImportError::from)
            .and_then(|images| build_deck(images, form))
            .inspect_err(|e| warn!(ticket = ticket.id, "import failed: {e}"))?;

        let id = deck.id;
        info!(deck = %id, name = %deck.name, cards = deck.len(), "imported deck");
        let next = self.collection.prepend(deck);
        self.commit(next);
        Ok(id)
    }

    /// Run a whole import against `extractor`
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Form` for invalid settings,
    /// `ImportError::MissingArchive` when no archive was supplied, and
    /// otherwise whatever `begin_import`/`complete_import` report.
    pub fn import_archive(
        &mut self,
        extractor: &impl ImageExtractor,
        archive: Option<&[u8]>,
        form: ImportForm,
    ) -> Result<DeckId, ImportError> {
        form.settings.validate()?;
        let archive = archive.ok_or(ImportError::MissingArchive)?;
        let ticket = self.begin_import()?;
        let extraction = extractor.extract_images(archive);
        self.complete_import(ticket, extraction, form)
    }

    /// Prepare an analysis request and mark the deck busy
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::UnknownDeck`, `AnalysisError::EmptyDeck`, or
    /// `AnalysisError::InProgress` if one is already pending for the deck.
    pub fn begin_analysis(&mut self, deck: &DeckId) -> Result<AnalysisRequest, AnalysisError> {
        let target = self
            .collection
            .get(deck)
            .ok_or(AnalysisError::UnknownDeck(*deck))?;
        if self.analyses_pending.contains(deck) {
            return Err(AnalysisError::InProgress(*deck));
        }
        let request = AnalysisRequest::for_deck(target)?;
        self.analyses_pending.insert(*deck);
        debug!(deck = %deck, sample = request.sample.len(), "analysis started");
        Ok(request)
    }

    /// Store the analyzer's result; the previous analysis survives any error
    ///
    /// # Errors
    ///
    /// Passes through the analyzer's error, reports blank text as
    /// `AnalysisError::EmptyResponse`, and `AnalysisError::UnknownDeck` if the
    /// deck was deleted meanwhile.
    pub fn complete_analysis(
        &mut self,
        request: AnalysisRequest,
        result: Result<String, AnalysisError>,
    ) -> Result<(), AnalysisError> {
        let id = request.deck_id;
        self.analyses_pending.remove(&id);

        let text = result
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(AnalysisError::EmptyResponse)
                } else {
                    Ok(text)
                }
            })
            .inspect_err(|e| warn!(deck = %id, "analysis rejected: {e}"))?;

        if !self.collection.contains(&id) {
            warn!(deck = %id, "analysis finished for a deleted deck");
            return Err(AnalysisError::UnknownDeck(id));
        }
        let next = mutations::set_analysis(&self.collection, &id, text);
        self.commit(next);
        info!(deck = %id, "stored analysis");
        Ok(())
    }

    /// Run a whole analysis against `analyzer`
    ///
    /// # Errors
    ///
    /// See `begin_analysis` and `complete_analysis`.
    pub fn analyze_deck(&mut self, deck: &DeckId, analyzer: &impl DeckAnalyzer) -> Result<(), AnalysisError> {
        let request = self.begin_analysis(deck)?;
        let result = analyzer.analyze(&request.name, &request.notes, &request.sample);
        self.complete_analysis(request, result)
    }
}
