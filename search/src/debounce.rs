/// 输入防抖 - 只有停止输入超过窗口时间后的最后一次调用才会执行
///
/// 不依赖计时器，由宿主传入当前时间：每次按键调用 [`Debouncer::schedule`]
/// 得到一个票据，计时器到期时用票据调用 [`Debouncer::should_fire`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u64,
    next_ticket: u32,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    ticket: u32,
    scheduled_at: u64,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// 记录一次输入，之前的票据全部作废
    pub fn schedule(&mut self, now_ms: u64) -> u32 {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(Pending {
            ticket: self.next_ticket,
            scheduled_at: now_ms,
        });
        self.next_ticket
    }

    /// 票据仍是最新的且已经静默足够长时间时返回 true，每个票据最多触发一次
    pub fn should_fire(&mut self, ticket: u32, now_ms: u64) -> bool {
        match self.pending {
            Some(pending)
                if pending.ticket == ticket
                    && now_ms.saturating_sub(pending.scheduled_at) >= self.window_ms =>
            {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
