use crate::region::AlignmentRegion;
use crate::trim::coverage_span;
use crate::{Result, WindowError};
use poa_graph::{
    AlignmentBuffers, AlignmentConfig, AlignmentEngine, Consensus, GraphError, PartialOrderGraph,
};
use std::convert::TryFrom;
use std::fmt;

/// Where the reads of a window come from. Only the trimming policy depends
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowType {
    Ngs,
    Tgs,
}

impl WindowType {
    /// Reads averaging at most 1000 bases are short reads.
    pub fn from_mean_read_length(total_length: usize, num_reads: usize) -> Self {
        if num_reads == 0 || total_length / num_reads <= 1000 {
            WindowType::Ngs
        } else {
            WindowType::Tgs
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowType::Ngs => write!(f, "NGS"),
            WindowType::Tgs => write!(f, "TGS"),
        }
    }
}

/// One piece of evidence: a read fragment (or the backbone itself) covering
/// `[begin, end)` of the backbone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    sequence: Vec<u8>,
    quality: Option<Vec<u8>>,
    begin: u32,
    end: u32,
}

impl Layer {
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
    pub fn quality(&self) -> Option<&[u8]> {
        self.quality.as_deref()
    }
    pub fn begin(&self) -> u32 {
        self.begin
    }
    pub fn end(&self) -> u32 {
        self.end
    }
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
    /// Per-base weight: phred score (offset 33) floored at one, or one for
    /// every base when there is no quality string.
    pub fn weights(&self) -> Vec<f64> {
        match &self.quality {
            Some(quality) => quality
                .iter()
                .map(|&q| q.saturating_sub(33).max(1) as f64)
                .collect(),
            None => vec![1.; self.sequence.len()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Window {
    id: u64,
    rank: u32,
    window_type: WindowType,
    layers: Vec<Layer>,
    consensus: Option<Vec<u8>>,
    coverages: Vec<u32>,
}

impl Window {
    pub fn new(
        id: u64,
        rank: u32,
        window_type: WindowType,
        backbone: &[u8],
        quality: &[u8],
    ) -> Result<Self> {
        let invalid = || WindowError::InvalidBackbone {
            id,
            backbone_len: backbone.len(),
            quality_len: quality.len(),
        };
        if backbone.is_empty() || backbone.len() != quality.len() {
            return Err(invalid());
        }
        let end = u32::try_from(backbone.len()).map_err(|_| invalid())?;
        let layer = Layer {
            sequence: backbone.to_vec(),
            quality: Some(quality.to_vec()),
            begin: 0,
            end,
        };
        Ok(Self {
            id,
            rank,
            window_type,
            layers: vec![layer],
            consensus: None,
            coverages: vec![],
        })
    }
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn rank(&self) -> u32 {
        self.rank
    }
    pub fn window_type(&self) -> WindowType {
        self.window_type
    }
    pub fn backbone(&self) -> &[u8] {
        &self.layers[0].sequence
    }
    fn backbone_len(&self) -> u32 {
        self.layers[0].end
    }
    /// Number of layers, the backbone included.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }
    pub fn layer(&self, i: usize) -> Option<&Layer> {
        self.layers.get(i)
    }
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
    pub fn consensus(&self) -> Option<&[u8]> {
        self.consensus.as_deref()
    }
    /// Coverage of each consensus base. Empty unless the consensus came from
    /// the graph.
    pub fn coverages(&self) -> &[u32] {
        &self.coverages
    }
    /// Append a layer covering `[begin, end)` of the backbone. Empty layers
    /// are silently ignored.
    pub fn add_layer(
        &mut self,
        sequence: &[u8],
        quality: Option<&[u8]>,
        begin: u32,
        end: u32,
    ) -> Result<()> {
        if sequence.is_empty() || begin == end {
            return Ok(());
        }
        if let Some(quality) = quality {
            if quality.len() != sequence.len() {
                return Err(WindowError::QualityLengthMismatch {
                    id: self.id,
                    sequence_len: sequence.len(),
                    quality_len: quality.len(),
                });
            }
        }
        let backbone_len = self.backbone_len();
        if begin >= end || begin > backbone_len || end > backbone_len {
            return Err(WindowError::InvalidLayerCoordinates {
                id: self.id,
                begin,
                end,
                backbone_len,
            });
        }
        self.layers.push(Layer {
            sequence: sequence.to_vec(),
            quality: quality.map(|q| q.to_vec()),
            begin,
            end,
        });
        Ok(())
    }
    /// Layer indices in the order they enter the graph: the backbone, then
    /// the rest by start position. Layers starting at the same position keep
    /// the order they were added in.
    pub fn processing_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.layers.len()).collect();
        let layers = &self.layers;
        order[1..].sort_by_key(|&i| layers[i].begin);
        order
    }
    /// Build the consensus with the default graph. Returns `Ok(false)` when
    /// there was too little evidence and the backbone was kept as is.
    pub fn generate_consensus(&mut self, config: &AlignmentConfig, trim: bool) -> Result<bool> {
        self.generate_consensus_with::<PartialOrderGraph>(config, trim)
    }
    pub fn generate_consensus_with<E: AlignmentEngine>(
        &mut self,
        config: &AlignmentConfig,
        trim: bool,
    ) -> Result<bool> {
        if self.layers.len() < 3 {
            self.consensus = Some(self.backbone().to_vec());
            self.coverages.clear();
            return Ok(false);
        }
        let id = self.id;
        config
            .validate()
            .map_err(|source| WindowError::InvalidConfig { id, source })?;
        let mut buffers = AlignmentBuffers::new();
        let Consensus {
            mut sequence,
            mut coverages,
        } = self
            .align_layers::<E>(config, &mut buffers)
            .map_err(|source| WindowError::Graph { id, source })?;
        debug!(
            "Window {}:{} consensus of {} bases from {} layers",
            self.id,
            self.rank,
            sequence.len(),
            self.layers.len()
        );
        if self.window_type == WindowType::Tgs && trim {
            let average_coverage = ((self.layers.len() - 1) / 2) as u32;
            match coverage_span(&coverages, average_coverage) {
                Some((begin, end)) => {
                    sequence.truncate(end + 1);
                    sequence.drain(..begin);
                    coverages.truncate(end + 1);
                    coverages.drain(..begin);
                }
                None => warn!(
                    "Contig {} might be chimeric in window {}.",
                    self.id, self.rank
                ),
            }
        }
        self.consensus = Some(sequence);
        self.coverages = coverages;
        Ok(true)
    }
    fn align_layers<E: AlignmentEngine>(
        &self,
        config: &AlignmentConfig,
        buffers: &mut AlignmentBuffers,
    ) -> std::result::Result<Consensus, GraphError> {
        let mut graph = E::init(config);
        let backbone = &self.layers[0];
        let alignment = graph.align_full(backbone.sequence(), buffers)?;
        graph.add_path(
            backbone.sequence(),
            &backbone.weights(),
            0,
            &alignment,
            Some(E::SINK_ID),
        )?;
        graph.topological_sort();
        let backbone_len = self.backbone_len();
        for i in self.processing_order().into_iter().skip(1) {
            let layer = &self.layers[i];
            let region = AlignmentRegion::select::<E>(layer.begin, layer.end, backbone_len);
            let (start, stop) = region.query_bounds(layer.len());
            if start == stop {
                debug!(
                    "Window {}: layer {} [{},{}) has nothing to align",
                    self.id, i, layer.begin, layer.end
                );
                continue;
            }
            let query = &layer.sequence()[start..stop];
            let weights = layer.weights();
            let alignment = graph.align_banded(query, config.band_width, region.range, buffers)?;
            trace!("Layer {}\t{}", i, alignment.score());
            graph.add_path(query, &weights[start..stop], i, &alignment, region.sink)?;
            graph.topological_sort();
        }
        graph.build_consensus()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.id,
            self.rank,
            self.window_type,
            self.backbone_len(),
            self.layers.len()
        )
    }
}
