use crate::error::RhError;

/// Result of a single read: `Ok(None)` once the reader is exhausted.
pub type ItemReaderResult<I> = Result<Option<I>, RhError>;

/// Result of processing an item: `Ok(None)` means the item was filtered out.
pub type ItemProcessorResult<O> = Result<Option<O>, RhError>;

/// Source of items, read one at a time.
pub trait ItemReader<I> {
    fn read(&self) -> ItemReaderResult<I>;
}

/// Transforms or filters an item read by an `ItemReader`.
pub trait ItemProcessor<I, O> {
    fn process(&self, item: &I) -> ItemProcessorResult<O>;
}

/// Destination of the items that survived processing.
pub trait ItemWriter<O> {
    fn write(&self, items: &[O]) -> Result<(), RhError>;

    fn flush(&self) -> Result<(), RhError> {
        Ok(())
    }

    fn open(&self) -> Result<(), RhError> {
        Ok(())
    }

    fn close(&self) -> Result<(), RhError> {
        Ok(())
    }
}
