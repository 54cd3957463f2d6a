//! Poll loop following the chain head.
//!
//! The loop moves through these states:
//!
//! - `Connecting`: connectivity check, plus block filter installation in
//!   `BlockFilter` mode
//! - `Scanning`: fetch every block above the cursor, filter, dispatch, advance
//! - `Waiting`: sleep the poll interval
//! - `FailedReconnect`: sleep the reconnect backoff before `Connecting` again
//! - `Cancelled`: terminal
//!
//! The very first connection attempt is special: when it fails the loop never
//! started and `run` returns `LoopExit::NotStarted`. After that, no error ends the
//! loop. Connection-class errors go through `FailedReconnect`, everything else
//! waits one poll interval and retries the same height.

use async_trait::async_trait;
use alloy::primitives::B256;
use std::{collections::VecDeque, future::Future, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
	models::{Block, BlockId, LoopExit, MatchCriteria, ScanMode, WatcherConfig},
	services::{
		blockchain::{BlockChainClient, BlockChainError},
		blockwatcher::{BlockWatcherError, ChainCursor},
		filter::TransactionFilter,
		lifecycle::{sleep_or_cancel, CancellationToken, ManagedLoop},
		notification::{EventDispatcher, Notifier},
	},
	utils::{
		metrics::{set_cursor_height, BLOCKS_SCANNED, NODE_RECONNECTS, TRANSACTIONS_MATCHED},
		BackoffPolicy,
	},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
	Connecting,
	Scanning,
	Waiting,
	FailedReconnect,
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanOutcome {
	/// The cursor reached the head
	CaughtUp,
	/// The per-scan block limit was hit before reaching the head
	Pending,
	Cancelled,
}

/// Service that watches the chain for matching payments
pub struct BlockWatcherService<C: BlockChainClient, N: Notifier> {
	client: Arc<C>,
	dispatcher: Arc<EventDispatcher<N>>,
	criteria: MatchCriteria,
	config: WatcherConfig,
	progress: watch::Sender<Option<u64>>,
}

impl<C: BlockChainClient, N: Notifier> BlockWatcherService<C, N> {
	/// Creates a new block watcher
	///
	/// # Arguments
	/// * `client` - Node client
	/// * `dispatcher` - Receives the matches of every block
	/// * `criteria` - Target address and minimum value
	/// * `config` - Intervals, timeouts and scan mode
	pub fn new(
		client: Arc<C>,
		dispatcher: Arc<EventDispatcher<N>>,
		criteria: MatchCriteria,
		config: WatcherConfig,
	) -> Self {
		let (progress, _) = watch::channel(None);
		Self {
			client,
			dispatcher,
			criteria,
			config,
			progress,
		}
	}

	/// Read-only view of the last processed height, `None` until the loop has started
	pub fn subscribe(&self) -> watch::Receiver<Option<u64>> {
		self.progress.subscribe()
	}

	fn publish(&self, height: u64) {
		self.progress.send_replace(Some(height));
		set_cursor_height(height);
	}

	/// Runs a node request under the fetch timeout
	async fn bounded<T>(
		&self,
		operation: &str,
		request: impl Future<Output = Result<T, BlockChainError>>,
	) -> Result<T, BlockWatcherError> {
		match tokio::time::timeout(self.config.fetch_timeout, request).await {
			Ok(result) => result.map_err(BlockWatcherError::from),
			Err(_) => Err(BlockWatcherError::fetch_error(format!(
				"{} timed out after {}s",
				operation,
				self.config.fetch_timeout.as_secs()
			))),
		}
	}

	async fn check_connection(&self) -> Result<(), BlockWatcherError> {
		let connected = tokio::time::timeout(self.config.fetch_timeout, self.client.is_connected())
			.await
			.unwrap_or(false);
		if connected {
			Ok(())
		} else {
			Err(BlockWatcherError::connect_error("node did not answer the connectivity check"))
		}
	}

	async fn install_filter(&self) -> Result<Option<String>, BlockWatcherError> {
		match self.config.scan_mode {
			ScanMode::Sequential => Ok(None),
			ScanMode::BlockFilter => {
				let filter_id = self
					.bounded("eth_newBlockFilter", self.client.new_block_filter())
					.await
					.map_err(|e| {
						BlockWatcherError::connect_error(format!("failed to install block filter: {}", e))
					})?;
				debug!(filter_id = %filter_id, "block filter installed");
				Ok(Some(filter_id))
			}
		}
	}

	/// First connection: positions the cursor at the current head
	async fn initialize(&self) -> Result<(ChainCursor, Option<String>), BlockWatcherError> {
		self.check_connection().await?;
		let head = self
			.bounded("eth_blockNumber", self.client.get_latest_block_number())
			.await?;
		let filter_id = self.install_filter().await?;
		Ok((ChainCursor::new(head), filter_id))
	}

	async fn reconnect(&self) -> Result<Option<String>, BlockWatcherError> {
		self.check_connection().await?;
		self.install_filter().await
	}

	/// Filters one block, dispatches its matches and advances the cursor past it
	async fn process_block(
		&self,
		cursor: &mut ChainCursor,
		block: &Block,
	) -> Result<(), BlockWatcherError> {
		let number = block.number();
		let matches = TransactionFilter::filter_block(block, &self.criteria);
		debug!(
			block = number,
			transactions = block.transactions.len(),
			matches = matches.len(),
			"scanned block"
		);

		if !matches.is_empty() {
			TRANSACTIONS_MATCHED.inc_by(matches.len() as u64);
			let delivered = self.dispatcher.dispatch_all(&matches).await;
			info!(block = number, matches = matches.len(), delivered, "dispatched alerts");
		}

		cursor.advance_to(number)?;
		BLOCKS_SCANNED.inc();
		self.publish(number);
		Ok(())
	}

	/// Processes blocks by height until the cursor reaches `target`
	async fn drain_to(
		&self,
		cursor: &mut ChainCursor,
		target: u64,
		limit: Option<u64>,
		cancel: &CancellationToken,
	) -> Result<ScanOutcome, BlockWatcherError> {
		let mut processed = 0u64;
		while cursor.current() < target {
			if cancel.is_cancelled() {
				return Ok(ScanOutcome::Cancelled);
			}
			if limit.is_some_and(|max| processed >= max) {
				return Ok(ScanOutcome::Pending);
			}

			let height = cursor.next_height();
			let block = tokio::select! {
				_ = cancel.cancelled() => return Ok(ScanOutcome::Cancelled),
				result = self.bounded(
					"eth_getBlockByNumber",
					self.client.get_block(BlockId::Number(height)),
				) => result?,
			};
			if block.number() != height {
				return Err(BlockWatcherError::fetch_error(format!(
					"requested block {} but node returned {}",
					height,
					block.number()
				)));
			}

			self.process_block(cursor, &block).await?;
			processed += 1;
		}
		Ok(ScanOutcome::CaughtUp)
	}

	async fn scan_sequential(
		&self,
		cursor: &mut ChainCursor,
		cancel: &CancellationToken,
	) -> Result<ScanOutcome, BlockWatcherError> {
		let head = tokio::select! {
			_ = cancel.cancelled() => return Ok(ScanOutcome::Cancelled),
			result = self.bounded("eth_blockNumber", self.client.get_latest_block_number()) => result?,
		};
		if head > cursor.current() {
			debug!(from = cursor.next_height(), head, "new blocks available");
		}
		self.drain_to(cursor, head, self.config.max_blocks_per_scan, cancel)
			.await
	}

	/// Fetches a block reported by the filter, `None` once the node no longer knows it
	async fn fetch_reported(&self, hash: B256) -> Result<Option<Block>, BlockWatcherError> {
		self.bounded("eth_getBlockByHash", async {
			match self.client.get_block(BlockId::Hash(hash)).await {
				Ok(block) => Ok(Some(block)),
				Err(BlockChainError::BlockNotFound(_)) => Ok(None),
				Err(e) => Err(e),
			}
		})
		.await
	}

	/// Processes the hashes reported by the block filter
	///
	/// A hash leaves `pending` only once its block has been processed, so a failed
	/// fetch keeps it and every later hash for the next iteration.
	async fn scan_filter(
		&self,
		cursor: &mut ChainCursor,
		filter_id: &str,
		pending: &mut VecDeque<B256>,
		cancel: &CancellationToken,
	) -> Result<ScanOutcome, BlockWatcherError> {
		let hashes = tokio::select! {
			_ = cancel.cancelled() => return Ok(ScanOutcome::Cancelled),
			result = self.bounded("eth_getFilterChanges", self.client.get_filter_changes(filter_id)) => {
				result.map_err(|e| BlockWatcherError::connect_error(format!("block filter lost: {}", e)))?
			}
		};
		pending.extend(hashes);

		while let Some(&hash) = pending.front() {
			if cancel.is_cancelled() {
				return Ok(ScanOutcome::Cancelled);
			}

			let reported = tokio::select! {
				_ = cancel.cancelled() => return Ok(ScanOutcome::Cancelled),
				result = self.fetch_reported(hash) => result?,
			};
			let Some(block) = reported else {
				warn!(hash = %hash, "reported block is no longer known to the node, dropping it");
				pending.pop_front();
				continue;
			};

			let number = block.number();
			if number <= cursor.current() {
				debug!(block = number, "block already processed, skipping");
				pending.pop_front();
				continue;
			}
			if number > cursor.next_height() {
				// Blocks were missed while the filter was being (re)installed
				let outcome = self.drain_to(cursor, number - 1, None, cancel).await?;
				if outcome == ScanOutcome::Cancelled {
					return Ok(outcome);
				}
			}
			self.process_block(cursor, &block).await?;
			pending.pop_front();
		}
		Ok(ScanOutcome::CaughtUp)
	}

	async fn scan(
		&self,
		cursor: &mut ChainCursor,
		filter_id: Option<&str>,
		pending: &mut VecDeque<B256>,
		cancel: &CancellationToken,
	) -> Result<ScanOutcome, BlockWatcherError> {
		match (self.config.scan_mode, filter_id) {
			(ScanMode::Sequential, _) => self.scan_sequential(cursor, cancel).await,
			(ScanMode::BlockFilter, Some(filter_id)) => {
				self.scan_filter(cursor, filter_id, pending, cancel).await
			}
			(ScanMode::BlockFilter, None) => Err(BlockWatcherError::connect_error(
				"block filter is not installed",
			)),
		}
	}
}

#[async_trait]
impl<C, N> ManagedLoop for BlockWatcherService<C, N>
where
	C: BlockChainClient + 'static,
	N: Notifier + 'static,
{
	async fn run(&self, cancel: CancellationToken) -> LoopExit {
		let initialized = tokio::select! {
			_ = cancel.cancelled() => return LoopExit::Cancelled,
			result = self.initialize() => result,
		};
		let (mut cursor, mut filter_id) = match initialized {
			Ok(initialized) => initialized,
			Err(e) => return LoopExit::NotStarted(e.to_string()),
		};

		info!(
			head = cursor.current(),
			target = %self.criteria.target_address,
			mode = ?self.config.scan_mode,
			"watching for payments"
		);
		self.publish(cursor.current());

		let policy =
			BackoffPolicy::from_bounds(self.config.reconnect_backoff, self.config.reconnect_backoff_max);
		let mut backoff = policy.start();
		let mut state = PollState::Scanning;
		let mut pending = VecDeque::new();

		loop {
			state = match state {
				PollState::Connecting => {
					let result = tokio::select! {
						_ = cancel.cancelled() => Ok(None),
						result = self.reconnect() => result,
					};
					match result {
						_ if cancel.is_cancelled() => PollState::Cancelled,
						Ok(new_filter) => {
							info!(block = cursor.current(), "reconnected to node");
							filter_id = new_filter;
							backoff = policy.start();
							PollState::Scanning
						}
						Err(e) => {
							warn!("reconnect failed: {}", e);
							PollState::FailedReconnect
						}
					}
				}
				PollState::Scanning => {
					match self.scan(&mut cursor, filter_id.as_deref(), &mut pending, &cancel).await {
						Ok(ScanOutcome::CaughtUp) => PollState::Waiting,
						Ok(ScanOutcome::Pending) => PollState::Scanning,
						Ok(ScanOutcome::Cancelled) => PollState::Cancelled,
						Err(e) if e.requires_reconnect() => {
							warn!(block = cursor.next_height(), "lost node connection: {}", e);
							PollState::FailedReconnect
						}
						Err(e) => {
							warn!(
								block = cursor.next_height(),
								"scan failed, retrying after poll interval: {}", e
							);
							PollState::Waiting
						}
					}
				}
				PollState::Waiting => {
					if sleep_or_cancel(&cancel, self.config.poll_interval).await {
						PollState::Scanning
					} else {
						PollState::Cancelled
					}
				}
				PollState::FailedReconnect => {
					NODE_RECONNECTS.inc();
					let delay = backoff.next_delay();
					info!(attempt = backoff.attempts(), "reconnecting in {}s", delay.as_secs());
					if sleep_or_cancel(&cancel, delay).await {
						PollState::Connecting
					} else {
						PollState::Cancelled
					}
				}
				PollState::Cancelled => {
					info!(block = cursor.current(), "poll loop cancelled");
					return LoopExit::Cancelled;
				}
			};

			if cancel.is_cancelled() {
				state = PollState::Cancelled;
			}
		}
	}
}
