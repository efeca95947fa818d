use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Age,
    FamilyCost,
    AttorneyCost,
}

impl Topic {
    pub fn title(&self) -> &'static str {
        match self {
            Topic::Age => "Why age matters",
            Topic::FamilyCost => "Family cost without a plan",
            Topic::AttorneyCost => "Attorney cost",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Topic::Age => "As you get older you usually own more, owe more and have more people depending on you. \
                Each of those adds work to an estate plan, so the estimate grows with your age.",
            Topic::FamilyCost => "Without a will or trust your estate goes through intestate probate. \
                Court fees, legal fees and delays typically leave your family paying about twice what \
                a plan would have cost up front.",
            Topic::AttorneyCost => "An estimate of the hours an estate planning attorney spends on a plan \
                for someone your age, multiplied by an average hourly rate. Complex estates are capped \
                at a fixed number of hours.",
        }
    }
}

/// At most one info dialog is open at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TooltipState {
    open: Option<Topic>,
}

impl TooltipState {
    pub fn open(&mut self, topic: Topic) {
        debug!("tooltip open: {:?}", topic);
        self.open = Some(topic);
    }

    pub fn close(&mut self) {
        if self.open.take().is_some() {
            debug!("tooltip closed");
        }
    }

    pub fn current(&self) -> Option<Topic> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}
